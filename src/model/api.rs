use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when a configuration payload is rejected
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConfigErrorDto {
    pub error: String,
    /// Always `config_error`
    pub code: String,
    /// Every structural problem found in the payload
    pub details: Vec<String>,
}

/// The response when the data provider fails a request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProviderErrorDto {
    pub error: String,
    /// Stable provider error code, e.g. `rate_limited`
    pub code: String,
}
