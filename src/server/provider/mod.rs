//! Data provider abstraction over remote record stores.
//!
//! Services only see [`DataProvider`]; the concrete store is picked per VA from the stored
//! configuration through [`ProviderRegistry`]. The configuration is passed explicitly into every
//! call, so one provider instance serves every VA.

pub mod airtable;
pub mod config;
pub mod schema;

pub use airtable::AirtableProvider;
pub use config::{ProviderConfigData, ProviderCredentials};

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::server::{
    error::provider::{ProviderError, ProviderErrorDetail},
    provider::schema::EntitySchema,
};

/// A record read from the provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRecord {
    pub id: String,
    pub created_time: Option<String>,
    /// Fields keyed by provider column name, as received
    pub raw: Map<String, Value>,
    /// Fields keyed by internal name, see [`EntitySchema::normalize`]
    pub normalized: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub records: Vec<ProviderRecord>,
    /// Continuation cursor for the next page
    pub offset: Option<String>,
    pub has_more: bool,
}

impl RecordSet {
    pub fn new(records: Vec<ProviderRecord>, offset: Option<String>) -> Self {
        let offset = offset.filter(|cursor| !cursor.is_empty());

        Self {
            has_more: offset.is_some(),
            records,
            offset,
        }
    }
}

/// Filters for [`DataProvider::fetch_records`]
///
/// `formula` takes precedence over `modified_since` when both are set.
#[derive(Debug, Clone, Default)]
pub struct FetchFilters {
    pub formula: Option<String>,
    pub modified_since: Option<DateTime<Utc>>,
    pub offset: Option<String>,
    pub page_size: Option<u32>,
}

pub const PHASE_CREDENTIALS: &str = "credentials";
pub const PHASE_TABLES: &str = "tables";
pub const PHASE_FIELDS: &str = "fields";

/// Outcome of a phased connectivity check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub success: bool,
    pub completed_phases: Vec<String>,
    pub failed_phases: Vec<String>,
    pub errors: Vec<ValidationIssue>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ValidationIssue {
    pub phase: String,
    #[serde(flatten)]
    pub detail: ProviderErrorDetail,
}

impl ValidationResult {
    pub fn complete(&mut self, phase: &str) {
        self.completed_phases.push(phase.to_string());
    }

    /// Records a failed phase; the caller stops at the first one
    pub fn fail(&mut self, phase: &str, detail: ProviderErrorDetail) {
        self.failed_phases.push(phase.to_string());
        self.errors.push(ValidationIssue {
            phase: phase.to_string(),
            detail,
        });
    }
}

/// Remote record store holding a VA's pilot, route and PIREP records
#[async_trait]
pub trait DataProvider: Send + Sync {
    fn provider_type(&self) -> &'static str;

    /// Fetches one record by ID and normalizes it with `schema`
    async fn fetch_record(
        &self,
        config: &ProviderConfigData,
        schema: &EntitySchema,
        record_id: &str,
    ) -> Result<ProviderRecord, ProviderError>;

    /// Fetches one page of records from the schema's table
    async fn fetch_records(
        &self,
        config: &ProviderConfigData,
        schema: &EntitySchema,
        filters: &FetchFilters,
    ) -> Result<RecordSet, ProviderError>;

    /// Creates a record from provider-field-keyed values and returns its ID
    async fn submit_record(
        &self,
        config: &ProviderConfigData,
        schema: &EntitySchema,
        fields: Map<String, Value>,
    ) -> Result<String, ProviderError>;

    /// Runs the ordered validation phases, stopping at the first failure
    async fn validate_config(&self, config: &ProviderConfigData) -> ValidationResult;
}

/// Resolves a provider implementation from a configuration's `providerType`
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn DataProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: Arc<dyn DataProvider>) -> Self {
        self.providers.insert(provider.provider_type(), provider);
        self
    }

    pub fn get(&self, provider_type: &str) -> Result<Arc<dyn DataProvider>, ProviderError> {
        self.providers
            .get(provider_type)
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedProvider(provider_type.to_string()))
    }
}
