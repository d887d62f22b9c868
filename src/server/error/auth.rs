use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request is missing the caller's Discord user ID")]
    MissingCallerIdentity,
    #[error("Caller's Discord user ID is malformed")]
    MalformedCallerIdentity,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
