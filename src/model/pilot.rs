use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A membership linked to its pilot record in the VA's data provider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PilotSyncDto {
    pub va_id: i32,
    pub callsign: String,
    pub provider_pilot_id: String,
}

/// The caller's pilot record, limited to user-visible fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PilotRecordDto {
    pub id: String,
    /// Keyed by display name, values formatted for display
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}
