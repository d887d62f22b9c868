//! Entity schemas: per-VA mapping between canonical field names and provider columns.
//!
//! A schema drives inbound normalization ([`EntitySchema::normalize`]) and exposure of
//! provider data to users ([`EntitySchema::to_user_visible`]). Outbound records are built by
//! the submission service field by field, since which fields go out depends on submission
//! rules; [`FieldMapping::coerce`] only handles value typing.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Logical entity types a VA can map to provider tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Pilot,
    Route,
    CareerMode,
    Pirep,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pilot => "pilot",
            Self::Route => "route",
            Self::CareerMode => "career_mode",
            Self::Pirep => "pirep",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldDataType {
    #[default]
    String,
    Int,
    Float,
    Boolean,
    Date,
}

/// How a user-visible field is rendered in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Seconds rendered as `HH:MM`
    Duration,
    Date,
    Datetime,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Canonical name used by the submission logic
    pub internal_name: String,
    /// Column name in the provider table
    pub provider_field_name: String,
    #[serde(default)]
    pub data_type: FieldDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<DisplayFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_user_visible: bool,
    /// Marks the field that receives the appended bot metadata block
    #[serde(default)]
    pub bot_metadata_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub default_value: Option<Value>,
}

impl FieldMapping {
    pub fn new(internal_name: impl Into<String>, provider_field_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            provider_field_name: provider_field_name.into(),
            data_type: FieldDataType::String,
            display_format: None,
            display_name: None,
            is_user_visible: false,
            bot_metadata_flag: false,
            default_value: None,
        }
    }

    /// Key used for this field in user-facing responses
    pub fn response_key(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.internal_name)
    }

    /// Converts an outbound value to the field's declared type.
    ///
    /// Values that cannot be converted, arrays (linked records) and nulls pass through
    /// unchanged; the provider is the final judge of what it accepts.
    pub fn coerce(&self, value: Value) -> Value {
        match (self.data_type, value) {
            (FieldDataType::Int, Value::Number(n)) => match n.as_i64() {
                Some(i) => Value::from(i),
                None => n
                    .as_f64()
                    .map(|f| Value::from(f.round() as i64))
                    .unwrap_or(Value::Number(n)),
            },
            (FieldDataType::Int, Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Value::from(i),
                Err(_) => Value::String(s),
            },
            (FieldDataType::Float, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::String(s)),
                Err(_) => Value::String(s),
            },
            (FieldDataType::Boolean, Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" => Value::Bool(true),
                "false" | "no" | "0" => Value::Bool(false),
                _ => Value::String(s),
            },
            (FieldDataType::String, Value::Number(n)) => Value::String(n.to_string()),
            (FieldDataType::String, Value::Bool(b)) => Value::String(b.to_string()),
            (_, value) => value,
        }
    }

    /// Renders a value according to `display_format`, or returns it unchanged
    pub fn format_for_display(&self, value: &Value) -> Value {
        let Some(format) = self.display_format else {
            return value.clone();
        };

        match format {
            DisplayFormat::Duration => value
                .as_f64()
                .map(|seconds| Value::String(format_duration(seconds)))
                .unwrap_or_else(|| value.clone()),
            DisplayFormat::Number => match value.as_f64() {
                Some(f) if f.fract() == 0.0 => Value::from(f as i64),
                Some(f) => Number::from_f64((f * 100.0).round() / 100.0)
                    .map(Value::Number)
                    .unwrap_or_else(|| value.clone()),
                None => value.clone(),
            },
            DisplayFormat::Date => value
                .as_str()
                .and_then(parse_date)
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or_else(|| value.clone()),
            DisplayFormat::Datetime => value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| {
                    Value::String(
                        dt.with_timezone(&chrono::Utc)
                            .format("%Y-%m-%d %H:%M UTC")
                            .to_string(),
                    )
                })
                .unwrap_or_else(|| value.clone()),
        }
    }
}

/// Formats seconds as zero-padded `HH:MM`, truncating leftover seconds
pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) / 60.0).floor() as u64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Mapping of one logical entity type to a provider table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub entity_type: EntityType,
    pub table_name: String,
    /// Field used by "modified since" sync filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_field: Option<String>,
    pub fields: Vec<FieldMapping>,
}

impl EntitySchema {
    /// Looks up a field by its canonical name
    pub fn get_field_mapping(&self, internal_name: &str) -> Option<&FieldMapping> {
        self.fields
            .iter()
            .find(|field| field.internal_name == internal_name)
    }

    /// Provider column names, used to request only mapped fields
    pub fn get_provider_field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| field.provider_field_name.clone())
            .collect()
    }

    /// The field carrying the bot metadata block, if any
    pub fn bot_metadata_field(&self) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.bot_metadata_flag)
    }

    /// Converts a raw provider record into an internal-name keyed map.
    ///
    /// Fields present in the payload are copied, absent fields fall back to their default
    /// value, and fields with neither are left out. Unmapped provider columns are dropped.
    pub fn normalize(&self, raw: &Map<String, Value>) -> Map<String, Value> {
        let mut normalized = Map::new();

        for field in &self.fields {
            if let Some(value) = raw.get(&field.provider_field_name) {
                normalized.insert(field.internal_name.clone(), value.clone());
            } else if let Some(default) = &field.default_value {
                normalized.insert(field.internal_name.clone(), default.clone());
            }
        }

        normalized
    }

    /// Builds a response map from normalized data, keeping only user-visible fields
    pub fn to_user_visible(&self, normalized: &Map<String, Value>) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|field| field.is_user_visible)
            .filter_map(|field| {
                normalized.get(&field.internal_name).map(|value| {
                    (
                        field.response_key().to_string(),
                        field.format_for_display(value),
                    )
                })
            })
            .collect()
    }

    /// Returns every structural problem with this schema
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let entity = self.entity_type;

        if self.table_name.trim().is_empty() {
            errors.push(format!("{} schema: tableName must not be empty", entity));
        }

        if self.fields.is_empty() {
            errors.push(format!("{} schema: at least one field mapping is required", entity));
        }

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.internal_name.trim().is_empty() {
                errors.push(format!(
                    "{} schema: field {} is missing internalName",
                    entity, index
                ));
            } else if !seen.insert(field.internal_name.as_str()) {
                errors.push(format!(
                    "{} schema: internalName '{}' is mapped more than once",
                    entity, field.internal_name
                ));
            }

            if field.provider_field_name.trim().is_empty() {
                errors.push(format!(
                    "{} schema: field {} is missing providerFieldName",
                    entity, index
                ));
            }
        }

        let flagged = self.fields.iter().filter(|f| f.bot_metadata_flag).count();
        if flagged > 1 {
            errors.push(format!(
                "{} schema: only one field may carry botMetadataFlag, found {}",
                entity, flagged
            ));
        }

        errors
    }
}
