use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Infinite Flight Live API error type.
///
/// The Live API wraps every response in `{ "errorCode": n, "result": ... }`; a non-zero
/// `errorCode` is surfaced as [`LiveApiError::ErrorCode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiveApiError {
    #[error("Failed to reach the Live API: {0}")]
    Network(String),
    #[error("Live API responded with status {status}")]
    Status { status: u16 },
    #[error("Live API returned error code {0}")]
    ErrorCode(i32),
    #[error("Failed to decode Live API response: {0}")]
    Decode(String),
}

impl LiveApiError {
    /// Live API code for "user not found"
    pub const USER_NOT_FOUND: i32 = 1;
    /// Live API code for "session/server not found"
    pub const SESSION_NOT_FOUND: i32 = 5;
    /// Live API code for "flight not found"
    pub const FLIGHT_NOT_FOUND: i32 = 6;

    /// Whether the error means the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ErrorCode(Self::USER_NOT_FOUND)
                | Self::ErrorCode(Self::SESSION_NOT_FOUND)
                | Self::ErrorCode(Self::FLIGHT_NOT_FOUND)
                | Self::Status { status: 404 }
        )
    }
}

impl From<reqwest::Error> for LiveApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl IntoResponse for LiveApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Live API error: {}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorDto {
                error: "Infinite Flight Live API is unavailable, please try again later"
                    .to_string(),
            }),
        )
            .into_response()
    }
}
