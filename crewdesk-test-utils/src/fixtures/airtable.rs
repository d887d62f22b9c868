//! Airtable mock endpoints, served from the same mockito server as the Live API.

use mockito::Matcher;
use serde_json::{json, Value};

use crate::TestContext;

impl TestContext {
    pub fn airtable<'a>(&'a mut self) -> AirtableFixtures<'a> {
        AirtableFixtures { setup: self }
    }
}

pub struct AirtableFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> AirtableFixtures<'a> {
    /// `POST /v0/{base_id}/{table}` creating a record.
    ///
    /// Any non-200 `status` answers with an Airtable error body and no record. When
    /// `body_contains` is set the request body must match it as a regex.
    pub fn create_record_endpoint(
        &mut self,
        base_id: &str,
        table: &str,
        status: usize,
        record_id: &str,
        body_contains: Option<&str>,
        expected_requests: usize,
    ) {
        let body = if status == 200 {
            json!({ "id": record_id, "createdTime": "2026-03-01T12:00:00.000Z", "fields": {} })
        } else {
            json!({ "error": { "type": "MODEL_ERROR", "message": "Request failed" } })
        };
        let matcher = match body_contains {
            Some(pattern) => Matcher::Regex(pattern.to_string()),
            None => Matcher::Any,
        };

        let mock = self
            .setup
            .server
            .mock("POST", format!("/v0/{}/{}", base_id, table).as_str())
            .match_body(matcher)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /v0/{base_id}/{table}` listing records, with any query
    pub fn create_list_records_endpoint(
        &mut self,
        base_id: &str,
        table: &str,
        records: Vec<Value>,
        expected_requests: usize,
    ) {
        let mock = self
            .setup
            .server
            .mock("GET", format!("/v0/{}/{}", base_id, table).as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "records": records }).to_string())
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /v0/{base_id}/{table}` answering only when `filterByFormula` is exactly `formula`
    pub fn create_filtered_list_records_endpoint(
        &mut self,
        base_id: &str,
        table: &str,
        formula: &str,
        records: Vec<Value>,
        expected_requests: usize,
    ) {
        let mock = self
            .setup
            .server
            .mock("GET", format!("/v0/{}/{}", base_id, table).as_str())
            .match_query(Matcher::UrlEncoded(
                "filterByFormula".to_string(),
                formula.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "records": records }).to_string())
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /v0/{base_id}/{table}/{record_id}`
    pub fn create_get_record_endpoint(
        &mut self,
        base_id: &str,
        table: &str,
        record: Value,
        expected_requests: usize,
    ) {
        let record_id = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mock = self
            .setup
            .server
            .mock("GET", format!("/v0/{}/{}/{}", base_id, table, record_id).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record.to_string())
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /v0/meta/bases/{base_id}/tables`; `status` other than 200 returns an error body
    pub fn create_meta_tables_endpoint(
        &mut self,
        base_id: &str,
        status: usize,
        tables: Vec<Value>,
        expected_requests: usize,
    ) {
        let body = if status == 200 {
            json!({ "tables": tables })
        } else {
            json!({ "error": { "type": "AUTHENTICATION_REQUIRED" } })
        };

        let mock = self
            .setup
            .server
            .mock("GET", format!("/v0/meta/bases/{}/tables", base_id).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }
}

/// A record as returned by Airtable
pub fn record(id: &str, fields: Value) -> Value {
    json!({ "id": id, "createdTime": "2026-03-01T12:00:00.000Z", "fields": fields })
}

/// Table metadata entry with the given column names
pub fn table_meta(id: &str, name: &str, fields: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "fields": fields.iter().map(|f| json!({ "name": f })).collect::<Vec<_>>()
    })
}
