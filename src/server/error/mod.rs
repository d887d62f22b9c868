//! Error types for the Crewdesk server application.
//!
//! This module provides the error hierarchy used across the server: one `thiserror` enum per
//! domain (configuration, caller identity, cache, data provider, Live API, PIREP pipeline),
//! aggregated into [`Error`]. All errors implement `IntoResponse` so controllers can return
//! them directly with `?`.

pub mod auth;
pub mod cache;
pub mod config;
pub mod live;
pub mod pirep;
pub mod provider;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, cache::CacheError, config::ConfigError, live::LiveApiError,
        provider::ProviderError,
    },
};

/// Main error type for the Crewdesk server application.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// unified error type. `#[from]` conversions allow `?` to lift any of them. Expected PIREP
/// validation outcomes are *not* represented here; they are returned as a typed
/// [`PirepSubmitResult`](crate::model::pirep::PirepSubmitResult) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (environment variables or malformed configuration payloads).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Caller identity missing or malformed.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Cache backend failure.
    #[error(transparent)]
    CacheError(#[from] CacheError),
    /// Data provider (Airtable) failure.
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Infinite Flight Live API failure.
    #[error(transparent)]
    LiveApiError(#[from] LiveApiError),
    /// A requested resource (VA, user, record) does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Caller-correctable request problem outside of the PIREP pipeline.
    #[error("{0}")]
    Validation(String),
    /// Internal error indicating a bug in Crewdesk's code.
    #[error("Internal error with Crewdesk's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Valkey/Redis client error.
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// JSON (de)serialization error.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    /// HTTP client construction error.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures
/// - 401 Unauthorized - Missing caller identity
/// - 404 Not Found - Missing VA, user or record
/// - 422 Unprocessable Entity - Malformed configuration payloads
/// - 502 Bad Gateway - Data provider or Live API failures
/// - 500 Internal Server Error - Everything else (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ProviderError(err) => err.into_response(),
            Self::LiveApiError(err) => err.into_response(),
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                (StatusCode::NOT_FOUND, Json(ErrorDto { error: message })).into_response()
            }
            Self::Validation(message) => {
                tracing::debug!("{}", message);

                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: message })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
