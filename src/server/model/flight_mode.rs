//! Typed per-VA flight mode configuration.
//!
//! Stored as JSON on `virtual_airline.flight_modes_config`, keyed by mode ID. The payload is
//! decoded once into these structs and structurally validated before it is persisted; the
//! submission pipeline only ever sees the typed form.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::server::error::config::ConfigError;

pub const VALIDATION_MODE_ANY: &str = "any";
pub const VALIDATION_MODE_EXACT_MATCH: &str = "exact_match";

fn default_validation_mode() -> String {
    VALIDATION_MODE_EXACT_MATCH.to_string()
}

fn default_field_type() -> String {
    "text".to_string()
}

/// Flight modes keyed by mode ID (e.g. `career`, `charter`); IDs are case-sensitive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightModesConfig(pub BTreeMap<String, FlightModeConfig>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightModeConfig {
    #[serde(default)]
    pub enabled: bool,
    pub display_name: String,
    #[serde(default)]
    pub requires_route_selection: bool,
    #[serde(default)]
    pub fields: Vec<ModeField>,
    #[serde(default)]
    pub validations: RouteValidation,
    #[serde(default)]
    pub metadata: ModeMetadata,
    /// Route used when the pilot does not pick one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_route: Option<AutoRoute>,
}

/// Input field shown to the pilot when filing under a mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeField {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteValidation {
    #[serde(default)]
    pub allow_any_current_route: bool,
    /// `any` or `exact_match`; unrecognised values behave as `exact_match`
    #[serde(default = "default_validation_mode")]
    pub validation_mode: String,
    #[serde(default)]
    pub allowed_routes: Vec<String>,
}

impl Default for RouteValidation {
    fn default() -> Self {
        Self {
            allow_any_current_route: false,
            validation_mode: default_validation_mode(),
            allowed_routes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    /// Free-form keys kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRoute {
    pub route_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl FlightModesConfig {
    /// Decodes and validates a raw payload, reporting every problem found
    pub fn parse(raw: Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(raw)
            .map_err(|e| ConfigError::InvalidPayload(vec![e.to_string()]))?;
        config.validate()?;

        Ok(config)
    }

    pub fn get(&self, mode_id: &str) -> Option<&FlightModeConfig> {
        self.0.get(mode_id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        for (mode_id, mode) in &self.0 {
            if mode_id.trim().is_empty() {
                errors.push("mode IDs must not be empty".to_string());
            }
            mode.collect_errors(mode_id, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidPayload(errors))
        }
    }
}

impl FlightModeConfig {
    /// Flight time multiplier: `metadata.multiplier`, else `autoRoute.multiplier`, else 1.0
    pub fn multiplier(&self) -> f64 {
        self.metadata
            .multiplier
            .or_else(|| self.auto_route.as_ref().and_then(|r| r.multiplier))
            .unwrap_or(1.0)
    }

    pub fn field(&self, name: &str) -> Option<&ModeField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Whether the mode marks the named input as required
    pub fn is_required(&self, name: &str) -> bool {
        self.field(name).is_some_and(|field| field.required)
    }

    fn collect_errors(&self, mode_id: &str, errors: &mut Vec<String>) {
        if self.display_name.trim().is_empty() {
            errors.push(format!("{}: displayName must not be empty", mode_id));
        }

        let validation_mode = self.validations.validation_mode.as_str();
        if validation_mode != VALIDATION_MODE_ANY && validation_mode != VALIDATION_MODE_EXACT_MATCH
        {
            errors.push(format!(
                "{}: validationMode '{}' must be '{}' or '{}'",
                mode_id, validation_mode, VALIDATION_MODE_ANY, VALIDATION_MODE_EXACT_MATCH
            ));
        }

        match &self.auto_route {
            None if !self.requires_route_selection => errors.push(format!(
                "{}: autoRoute is required when requiresRouteSelection is false",
                mode_id
            )),
            Some(route) if route.route_name.trim().is_empty() => {
                errors.push(format!("{}: autoRoute.routeName must not be empty", mode_id))
            }
            _ => {}
        }

        let multipliers = [
            ("metadata.multiplier", self.metadata.multiplier),
            (
                "autoRoute.multiplier",
                self.auto_route.as_ref().and_then(|r| r.multiplier),
            ),
        ];
        for (name, multiplier) in multipliers {
            if let Some(m) = multiplier {
                if !m.is_finite() || m <= 0.0 {
                    errors.push(format!("{}: {} must be a positive number", mode_id, name));
                }
            }
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                errors.push(format!("{}: field names must not be empty", mode_id));
            } else if !names.insert(field.name.as_str()) {
                errors.push(format!("{}: field '{}' is declared twice", mode_id, field.name));
            }
        }
    }
}
