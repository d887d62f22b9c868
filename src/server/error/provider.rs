//! Data provider error types.
//!
//! Every variant carries a stable machine-readable [`code`](ProviderError::code) so callers
//! can distinguish rate limiting from bad credentials without matching on messages. Where
//! the provider returned a body it is kept for diagnostics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::StatusCode as HttpStatus;
use serde::Serialize;
use thiserror::Error;

use crate::model::api::ProviderErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Request never produced an HTTP response (DNS, connect, timeout).
    #[error("Failed to reach data provider: {message}")]
    Network { message: String },
    /// Provider answered 401.
    #[error("Data provider rejected the configured API key")]
    InvalidCredentials { body: Option<String> },
    /// Provider answered 404 for the configured base/store.
    #[error("Data provider base or table was not found")]
    InvalidBaseId { body: Option<String> },
    /// Provider answered 429.
    #[error("Data provider rate limit reached, try again shortly")]
    RateLimited { body: Option<String> },
    /// Any other non-2xx status.
    #[error("Data provider responded with status {status}")]
    Api { status: u16, body: Option<String> },
    #[error("Failed to decode data provider response: {message}")]
    Decode { message: String },
    #[error("Unsupported data provider type: {0}")]
    UnsupportedProvider(String),
}

impl ProviderError {
    /// Maps a non-success HTTP status to its typed error.
    pub fn from_status(status: HttpStatus, body: Option<String>) -> Self {
        match status {
            HttpStatus::UNAUTHORIZED => Self::InvalidCredentials { body },
            HttpStatus::NOT_FOUND => Self::InvalidBaseId { body },
            HttpStatus::TOO_MANY_REQUESTS => Self::RateLimited { body },
            status => Self::Api {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network_error",
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::InvalidBaseId { .. } => "invalid_base_id",
            Self::RateLimited { .. } => "rate_limited",
            Self::Api { .. } => "api_error",
            Self::Decode { .. } => "decode_error",
            Self::UnsupportedProvider(_) => "unsupported_provider",
        }
    }

    /// Raw provider response body, if one was received
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { body }
            | Self::InvalidBaseId { body }
            | Self::RateLimited { body }
            | Self::Api { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Structured form used in validation reports
    pub fn to_detail(&self) -> ProviderErrorDetail {
        ProviderErrorDetail {
            code: self.code().to_string(),
            message: self.to_string(),
            body: self.body().map(str::to_string),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Serializable provider error used inside [`ValidationResult`](crate::server::provider::ValidationResult)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ProviderErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        tracing::warn!(code = self.code(), body = ?self.body(), "Data provider error: {}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ProviderErrorDto {
                error: self.to_string(),
                code: self.code().to_string(),
            }),
        )
            .into_response()
    }
}
