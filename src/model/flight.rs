use serde::{Deserialize, Serialize};

/// A live flight on the VA's game server, enriched with its flight plan route
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LiveFlightDto {
    pub flight_id: String,
    pub callsign: String,
    pub username: Option<String>,
    pub aircraft_id: String,
    pub livery_id: String,
    pub altitude: f64,
    pub speed: f64,
    /// First 4-letter waypoint of the flight plan, empty when unresolved
    pub origin: String,
    /// Last 4-letter waypoint of the flight plan, empty when unresolved
    pub destination: String,
}

/// Result of checking the caller's current flight against a flight mode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EligibilityDto {
    pub mode: String,
    pub valid: bool,
    pub current_route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
