//! PIREP pipeline outcome errors.
//!
//! These never leave the submission service as an [`Error`](super::Error): the service
//! converts them into a [`PirepSubmitResult`](crate::model::pirep::PirepSubmitResult) so that
//! expected failures reach the caller as a typed result rather than a 5xx.

use thiserror::Error;

use crate::server::error::provider::ProviderError;

pub const VALIDATION_ERROR: &str = "validation_error";
pub const PROVIDER_ERROR: &str = "provider_error";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PirepError {
    /// Caller-correctable input or state problem
    #[error("{0}")]
    Validation(String),
    /// The data provider failed the final write
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl PirepError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Machine-distinguishable error category
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => VALIDATION_ERROR,
            Self::Provider(_) => PROVIDER_ERROR,
        }
    }

    /// Provider code for provider failures (e.g. `rate_limited`)
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Validation(_) => None,
            Self::Provider(err) => Some(err.code()),
        }
    }
}
