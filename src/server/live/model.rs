//! Live API v2 payloads. Only fields the server uses are decoded.

use serde::{Deserialize, Serialize};

/// Every Live API response is wrapped in this envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub error_code: i32,
    pub result: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub user_count: i64,
    #[serde(default)]
    pub max_users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFlight {
    pub flight_id: String,
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    pub callsign: String,
    #[serde(default)]
    pub aircraft_id: String,
    #[serde(default)]
    pub livery_id: String,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub virtual_organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPlan {
    #[serde(default)]
    pub flight_plan_id: Option<String>,
    pub flight_id: String,
    #[serde(default)]
    pub waypoints: Vec<String>,
}

impl FlightPlan {
    /// Origin and destination from the first and last waypoints.
    ///
    /// Each side is resolved only when its waypoint is a 4-character airport identifier;
    /// otherwise it is left empty.
    pub fn origin_destination(&self) -> (String, String) {
        let origin = self
            .waypoints
            .first()
            .filter(|w| is_airport_code(w))
            .cloned()
            .unwrap_or_default();
        let destination = self
            .waypoints
            .last()
            .filter(|w| self.waypoints.len() > 1 && is_airport_code(w))
            .cloned()
            .unwrap_or_default();

        (origin, destination)
    }
}

fn is_airport_code(waypoint: &str) -> bool {
    waypoint.chars().count() == 4
}

/// One logbook entry from a user's flight history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFlight {
    pub id: String,
    pub created: String,
    #[serde(default)]
    pub aircraft_id: String,
    #[serde(default)]
    pub livery_id: String,
    #[serde(default)]
    pub callsign: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub day_time: f64,
    #[serde(default)]
    pub night_time: f64,
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub landing_count: i64,
    #[serde(default)]
    pub origin_airport: Option<String>,
    #[serde(default)]
    pub destination_airport: Option<String>,
    #[serde(default)]
    pub xp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightHistoryPage {
    pub page_index: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub data: Vec<UserFlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveUser {
    pub user_id: String,
    #[serde(default)]
    pub discourse_username: Option<String>,
    #[serde(default)]
    pub virtual_organization: Option<String>,
}
