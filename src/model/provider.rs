use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request body for saving a VA's data provider configuration
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SaveProviderConfigDto {
    /// Provider configuration: `providerType`, `credentials` and entity `schemas`
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
    /// Optional features switched on for this VA, e.g. `pilot_sync`
    #[serde(default)]
    pub features_enabled: Vec<String>,
}

/// A stored provider configuration version, without credentials
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProviderConfigDto {
    pub id: i32,
    pub va_id: i32,
    pub provider_type: String,
    pub config_version: i32,
    pub is_active: bool,
    /// `pending`, `valid` or `invalid`
    pub validation_status: String,
    pub features_enabled: Vec<String>,
    pub updated_at: NaiveDateTime,
}

impl From<entity::data_provider_config::Model> for ProviderConfigDto {
    fn from(config: entity::data_provider_config::Model) -> Self {
        let features_enabled = serde_json::from_value(config.features_enabled).unwrap_or_default();

        Self {
            id: config.id,
            va_id: config.va_id,
            provider_type: config.provider_type,
            config_version: config.config_version,
            is_active: config.is_active,
            validation_status: config.validation_status,
            features_enabled,
            updated_at: config.updated_at,
        }
    }
}
