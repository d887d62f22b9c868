//! Airtable implementation of [`DataProvider`].
//!
//! Records live at `{base_url}/v0/{baseId}/{table}`; the metadata API at
//! `{base_url}/v0/meta/bases/{baseId}/tables` backs the table and field validation phases.

use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::time::Instant;

use crate::server::{
    error::{
        config::ConfigError,
        provider::{ProviderError, ProviderErrorDetail},
        Error,
    },
    provider::{
        config::AIRTABLE,
        schema::EntitySchema,
        DataProvider, FetchFilters, ProviderConfigData, ProviderCredentials, ProviderRecord,
        RecordSet, ValidationResult, PHASE_CREDENTIALS, PHASE_FIELDS, PHASE_TABLES,
    },
};

/// Airtable rejects page sizes above this
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(rename = "createdTime", default)]
    created_time: Option<String>,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct AirtableRecordList {
    records: Vec<AirtableRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateRecord<'a> {
    fields: &'a Map<String, Value>,
    typecast: bool,
}

#[derive(Debug, Deserialize)]
struct TableList {
    tables: Vec<TableMeta>,
}

#[derive(Debug, Deserialize)]
struct TableMeta {
    id: String,
    name: String,
    #[serde(default)]
    fields: Vec<FieldMeta>,
}

#[derive(Debug, Deserialize)]
struct FieldMeta {
    name: String,
}

#[derive(Debug, Clone)]
pub struct AirtableProvider {
    http: reqwest::Client,
    base_url: Url,
}

impl AirtableProvider {
    /// Creates a provider talking to `base_url` (normally `https://api.airtable.com`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidEnvValue {
            var: "AIRTABLE_API_URL".to_string(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    fn credentials(config: &ProviderConfigData) -> Result<&ProviderCredentials, ProviderError> {
        config
            .credentials
            .as_ref()
            .filter(|c| !c.api_key.trim().is_empty() && !c.base_id.trim().is_empty())
            .ok_or(ProviderError::InvalidCredentials { body: None })
    }

    /// Builds a URL from path segments, percent-encoding each one (table names may contain spaces)
    fn url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Network {
                message: format!("invalid provider base URL {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn table_url(
        &self,
        credentials: &ProviderCredentials,
        schema: &EntitySchema,
    ) -> Result<Url, ProviderError> {
        self.url(&["v0", &credentials.base_id, &schema.table_name])
    }

    async fn send<T>(&self, request: RequestBuilder, api_key: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let response = request.bearer_auth(api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.ok().filter(|body| !body.is_empty());
            return Err(ProviderError::from_status(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode {
                message: e.to_string(),
            })
    }

    fn into_record(record: AirtableRecord, schema: &EntitySchema) -> ProviderRecord {
        ProviderRecord {
            normalized: schema.normalize(&record.fields),
            id: record.id,
            created_time: record.created_time,
            raw: record.fields,
        }
    }

    async fn list_tables(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<Vec<TableMeta>, ProviderError> {
        let url = self.url(&["v0", "meta", "bases", &credentials.base_id, "tables"])?;
        let list: TableList = self.send(self.http.get(url), &credentials.api_key).await?;

        Ok(list.tables)
    }
}

/// Formula selecting records modified after `since`
fn modified_since_formula(schema: &EntitySchema, since: &chrono::DateTime<chrono::Utc>) -> String {
    let field = match &schema.last_modified_field {
        Some(field) => format!("{{{}}}", field),
        None => "LAST_MODIFIED_TIME()".to_string(),
    };

    format!(
        "IS_AFTER({}, '{}')",
        field,
        since.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )
}

/// Escapes a value for use inside a single-quoted formula string
pub fn escape_formula_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[async_trait]
impl DataProvider for AirtableProvider {
    fn provider_type(&self) -> &'static str {
        AIRTABLE
    }

    async fn fetch_record(
        &self,
        config: &ProviderConfigData,
        schema: &EntitySchema,
        record_id: &str,
    ) -> Result<ProviderRecord, ProviderError> {
        let credentials = Self::credentials(config)?;
        let mut url = self.table_url(credentials, schema)?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Network {
                message: "invalid record URL".to_string(),
            })?
            .push(record_id);

        let record: AirtableRecord = self.send(self.http.get(url), &credentials.api_key).await?;

        Ok(Self::into_record(record, schema))
    }

    async fn fetch_records(
        &self,
        config: &ProviderConfigData,
        schema: &EntitySchema,
        filters: &FetchFilters,
    ) -> Result<RecordSet, ProviderError> {
        let credentials = Self::credentials(config)?;
        let url = self.table_url(credentials, schema)?;

        let mut query: Vec<(&str, String)> = Vec::new();
        let formula = filters.formula.clone().or_else(|| {
            filters
                .modified_since
                .as_ref()
                .map(|since| modified_since_formula(schema, since))
        });
        if let Some(formula) = formula {
            query.push(("filterByFormula", formula));
        }
        if let Some(page_size) = filters.page_size {
            query.push(("pageSize", page_size.clamp(1, MAX_PAGE_SIZE).to_string()));
        }
        if let Some(offset) = filters.offset.as_ref().filter(|o| !o.is_empty()) {
            query.push(("offset", offset.clone()));
        }
        for field in schema.get_provider_field_names() {
            query.push(("fields[]", field));
        }

        let list: AirtableRecordList = self
            .send(self.http.get(url).query(&query), &credentials.api_key)
            .await?;

        let records = list
            .records
            .into_iter()
            .map(|record| Self::into_record(record, schema))
            .collect();

        Ok(RecordSet::new(records, list.offset))
    }

    async fn submit_record(
        &self,
        config: &ProviderConfigData,
        schema: &EntitySchema,
        fields: Map<String, Value>,
    ) -> Result<String, ProviderError> {
        let credentials = Self::credentials(config)?;
        let url = self.table_url(credentials, schema)?;
        let body = CreateRecord {
            fields: &fields,
            typecast: true,
        };

        let record: AirtableRecord = self
            .send(self.http.post(url).json(&body), &credentials.api_key)
            .await?;

        tracing::debug!(table = %schema.table_name, record_id = %record.id, "Created provider record");

        Ok(record.id)
    }

    async fn validate_config(&self, config: &ProviderConfigData) -> ValidationResult {
        let started = Instant::now();
        let mut result = ValidationResult::default();

        let tables = match Self::credentials(config) {
            Ok(credentials) => self.list_tables(credentials).await,
            Err(e) => Err(e),
        };
        let tables = match tables {
            Ok(tables) => {
                result.complete(PHASE_CREDENTIALS);
                tables
            }
            Err(e) => {
                result.fail(PHASE_CREDENTIALS, e.to_detail());
                result.duration_ms = started.elapsed().as_millis() as u64;
                return result;
            }
        };

        let mut missing_tables = Vec::new();
        let mut missing_fields = Vec::new();
        for schema in &config.schemas {
            let Some(table) = tables
                .iter()
                .find(|t| t.name == schema.table_name || t.id == schema.table_name)
            else {
                missing_tables.push(schema.table_name.clone());
                continue;
            };

            let known: HashSet<&str> = table.fields.iter().map(|f| f.name.as_str()).collect();
            for field in &schema.fields {
                if !known.contains(field.provider_field_name.as_str()) {
                    missing_fields.push(format!(
                        "{}.{}",
                        schema.table_name, field.provider_field_name
                    ));
                }
            }
        }

        if !missing_tables.is_empty() {
            result.fail(
                PHASE_TABLES,
                ProviderErrorDetail {
                    code: "table_not_found".to_string(),
                    message: format!("Tables not found in base: {}", missing_tables.join(", ")),
                    body: None,
                },
            );
        } else {
            result.complete(PHASE_TABLES);

            if missing_fields.is_empty() {
                result.complete(PHASE_FIELDS);
            } else {
                result.fail(
                    PHASE_FIELDS,
                    ProviderErrorDetail {
                        code: "field_not_found".to_string(),
                        message: format!("Fields not found: {}", missing_fields.join(", ")),
                        body: None,
                    },
                );
            }
        }

        result.success = result.failed_phases.is_empty();
        result.duration_ms = started.elapsed().as_millis() as u64;
        result
    }
}
