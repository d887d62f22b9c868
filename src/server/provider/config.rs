use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::server::{
    error::config::ConfigError,
    provider::schema::{EntitySchema, EntityType},
};

pub const AIRTABLE: &str = "airtable";

/// Provider types a configuration may name
pub const SUPPORTED_PROVIDERS: &[&str] = &[AIRTABLE];

fn default_version() -> String {
    "1.0".to_string()
}

/// One VA's configuration for one provider, stored as the `config_data` JSON blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigData {
    #[serde(default = "default_version")]
    pub version: String,
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ProviderCredentials>,
    #[serde(default)]
    pub schemas: Vec<EntitySchema>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    pub api_key: String,
    pub base_id: String,
}

// Keep API keys out of logs
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .finish()
    }
}

impl ProviderConfigData {
    /// Decodes and structurally validates a raw configuration payload.
    pub fn parse(raw: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(raw)
            .map_err(|e| ConfigError::InvalidPayload(vec![e.to_string()]))?;
        config.validate()?;

        Ok(config)
    }

    /// Schema for an entity type, looked up at runtime
    pub fn schema(&self, entity_type: EntityType) -> Option<&EntitySchema> {
        self.schemas
            .iter()
            .find(|schema| schema.entity_type == entity_type)
    }

    /// Checks every structural rule and reports all problems at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !SUPPORTED_PROVIDERS.contains(&self.provider_type.as_str()) {
            errors.push(format!(
                "providerType '{}' is not supported (expected one of: {})",
                self.provider_type,
                SUPPORTED_PROVIDERS.join(", ")
            ));
        }

        if self.provider_type == AIRTABLE {
            match &self.credentials {
                None => errors.push("credentials are required for airtable".to_string()),
                Some(credentials) => {
                    if credentials.api_key.trim().is_empty() {
                        errors.push("credentials.apiKey must not be empty".to_string());
                    }
                    if credentials.base_id.trim().is_empty() {
                        errors.push("credentials.baseId must not be empty".to_string());
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        for schema in &self.schemas {
            if !seen.insert(schema.entity_type) {
                errors.push(format!(
                    "more than one schema configured for entity type '{}'",
                    schema.entity_type
                ));
            }
            errors.extend(schema.validate());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidPayload(errors))
        }
    }
}
