use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ConfigErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
    /// Configuration payload failed structural validation; nothing was persisted.
    ///
    /// Carries every problem found rather than only the first one.
    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidPayload(Vec<String>),
}

impl ConfigError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        "config_error"
    }
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidPayload(errors) => {
                tracing::debug!(errors = ?errors, "Rejected configuration payload");

                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ConfigErrorDto {
                        error: "Configuration is invalid".to_string(),
                        code: "config_error".to_string(),
                        details: errors,
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
