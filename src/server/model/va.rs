use serde::{Deserialize, Serialize};

use crate::server::{
    error::config::ConfigError,
    model::{db::VirtualAirlineModel, flight_mode::FlightModesConfig},
};

/// A VA's configuration as used by the submission pipeline, cached under
/// [`va_config`](crate::server::cache::keys::va_config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaConfig {
    pub id: i32,
    pub name: String,
    pub callsign_prefix: String,
    pub callsign_suffix: String,
    /// Live API session name or ID
    pub game_server: Option<String>,
    pub flight_modes: FlightModesConfig,
}

impl VaConfig {
    /// Builds the typed configuration from the stored row.
    ///
    /// A VA without flight modes gets an empty configuration; stored JSON that no longer
    /// decodes is reported as a configuration error.
    pub fn from_model(va: VirtualAirlineModel) -> Result<Self, ConfigError> {
        let flight_modes = match va.flight_modes_config {
            None => FlightModesConfig::default(),
            Some(raw) => serde_json::from_value(raw).map_err(|e| {
                ConfigError::InvalidPayload(vec![format!(
                    "stored flight modes for VA {} are invalid: {}",
                    va.id, e
                )])
            })?,
        };

        Ok(Self {
            id: va.id,
            name: va.name,
            callsign_prefix: va.callsign_prefix.unwrap_or_default().trim().to_string(),
            callsign_suffix: va.callsign_suffix.unwrap_or_default().trim().to_string(),
            game_server: va.game_server.filter(|server| !server.trim().is_empty()),
            flight_modes,
        })
    }

    /// Whether the VA has a callsign pattern to filter live rosters with
    pub fn has_callsign_pattern(&self) -> bool {
        !self.callsign_prefix.is_empty() || !self.callsign_suffix.is_empty()
    }
}
