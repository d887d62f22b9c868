use serde::{Deserialize, Serialize};

use crate::server::error::pirep::PirepError;

/// PIREP submission request
///
/// `flight_time` is `HH:MM`. Optional numeric fields are only required when the selected
/// flight mode marks them as required.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PirepSubmitDto {
    /// Flight mode ID, e.g. `career` or `charter`
    pub mode: String,
    /// Route name, required when the mode requires manual route selection
    #[serde(default)]
    pub route_id: Option<String>,
    #[serde(default)]
    pub flight_time: Option<String>,
    #[serde(default)]
    pub fuel_kg: Option<f64>,
    #[serde(default)]
    pub cargo_kg: Option<f64>,
    #[serde(default)]
    pub passengers: Option<i64>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Outcome of a PIREP submission
///
/// Returned for both successes and expected failures; `error_type` is `validation_error`
/// when the pilot must fix their input or state and `provider_error` when the data
/// provider failed the write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PirepSubmitResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Provider error code for provider failures, e.g. `rate_limited`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pirep_id: Option<String>,
}

impl PirepSubmitResult {
    pub fn success(pirep_id: String) -> Self {
        Self {
            success: true,
            message: "PIREP submitted successfully".to_string(),
            error_type: None,
            error_code: None,
            error_message: None,
            pirep_id: Some(pirep_id),
        }
    }

    pub fn failure(err: &PirepError) -> Self {
        let message = match err {
            PirepError::Validation(_) => "PIREP could not be submitted, please check your input",
            PirepError::Provider(_) => {
                "PIREP could not be saved to the VA's records, please try again later"
            }
        };

        Self {
            success: false,
            message: message.to_string(),
            error_type: Some(err.error_type().to_string()),
            error_code: err.error_code().map(str::to_string),
            error_message: Some(err.to_string()),
            pirep_id: None,
        }
    }
}
