use std::time::Duration;

use chrono::{TimeZone, Utc};

use crewdesk::server::{
    error::provider::ProviderError,
    provider::{DataProvider, FetchFilters, PHASE_CREDENTIALS, PHASE_TABLES},
};
use crewdesk_test_utils::fixtures::{
    airtable::{record, table_meta},
    factory::{PILOT_TABLE, PIREP_TABLE},
};
use serde_json::{json, Map, Value};

use super::*;

/// Expect records keyed by internal name next to the raw provider fields
#[tokio::test]
async fn fetch_records_normalizes_fields() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.airtable().create_list_records_endpoint(
        BASE_ID,
        PILOT_TABLE,
        vec![record(
            "recPilot1",
            json!({ "Callsign": "DAL123", "Total Hours": 12.5, "Notes": "ignored" }),
        )],
        1,
    );

    let config = config();
    let records = provider(&test)
        .fetch_records(
            &config,
            &schema(&config, EntityType::Pilot),
            &FetchFilters {
                formula: Some("{Callsign} = 'DAL123'".to_string()),
                page_size: Some(500),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!records.has_more);
    assert_eq!(records.records.len(), 1);
    let pilot = &records.records[0];
    assert_eq!(pilot.id, "recPilot1");
    assert_eq!(pilot.normalized.get("callsign"), Some(&json!("DAL123")));
    assert_eq!(pilot.normalized.get("total_hours"), Some(&json!(12.5)));
    assert!(!pilot.normalized.contains_key("Notes"));
    assert!(pilot.raw.contains_key("Notes"));
    test.assert_mocks();

    Ok(())
}

/// Expect an explicit formula to be sent instead of the modified-since filter
#[tokio::test]
async fn fetch_records_prefers_formula_over_modified_since() -> Result<(), TestError> {
    let formula = "{Callsign} = 'DAL123'";
    let mut test = TestBuilder::new().build().await?;
    test.airtable().create_filtered_list_records_endpoint(
        BASE_ID,
        PILOT_TABLE,
        formula,
        vec![record("recPilot1", json!({ "Callsign": "DAL123" }))],
        1,
    );

    let config = config();
    let records = provider(&test)
        .fetch_records(
            &config,
            &schema(&config, EntityType::Pilot),
            &FetchFilters {
                formula: Some(formula.to_string()),
                modified_since: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(records.records.len(), 1);
    test.assert_mocks();

    Ok(())
}

/// Expect the modified-since filter to be sent when no formula is given
#[tokio::test]
async fn fetch_records_filters_by_modified_since() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.airtable().create_filtered_list_records_endpoint(
        BASE_ID,
        PILOT_TABLE,
        "IS_AFTER(LAST_MODIFIED_TIME(), '2026-03-01T00:00:00Z')",
        Vec::new(),
        1,
    );

    let config = config();
    let records = provider(&test)
        .fetch_records(
            &config,
            &schema(&config, EntityType::Pilot),
            &FetchFilters {
                modified_since: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(records.records.is_empty());
    test.assert_mocks();

    Ok(())
}

/// Expect a single record fetched by ID
#[tokio::test]
async fn fetch_record_by_id() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.airtable().create_get_record_endpoint(
        BASE_ID,
        PILOT_TABLE,
        record("recPilot9", json!({ "Callsign": "DAL9" })),
        1,
    );

    let config = config();
    let pilot = provider(&test)
        .fetch_record(&config, &schema(&config, EntityType::Pilot), "recPilot9")
        .await
        .unwrap();

    assert_eq!(pilot.id, "recPilot9");
    assert_eq!(pilot.normalized.get("callsign"), Some(&json!("DAL9")));
    test.assert_mocks();

    Ok(())
}

/// Expect the created record's ID and a typecast request body
#[tokio::test]
async fn submit_record_returns_record_id() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.airtable().create_record_endpoint(
        BASE_ID,
        PIREP_TABLE,
        200,
        "recPirep7",
        Some(r#""typecast":true"#),
        1,
    );

    let config = config();
    let mut fields = Map::new();
    fields.insert("Aircraft".to_string(), Value::from("Airbus A321"));
    let record_id = provider(&test)
        .submit_record(&config, &schema(&config, EntityType::Pirep), fields)
        .await
        .unwrap();

    assert_eq!(record_id, "recPirep7");
    test.assert_mocks();

    Ok(())
}

/// Expect HTTP failures to map onto typed provider errors
#[tokio::test]
async fn submit_record_maps_status_codes() -> Result<(), TestError> {
    for (status, code) in [
        (401, "invalid_credentials"),
        (404, "invalid_base_id"),
        (429, "rate_limited"),
        (503, "api_error"),
    ] {
        let mut test = TestBuilder::new().build().await?;
        test.airtable()
            .create_record_endpoint(BASE_ID, PIREP_TABLE, status, "", None, 1);

        let config = config();
        let err = provider(&test)
            .submit_record(&config, &schema(&config, EntityType::Pirep), Map::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), code, "status {}", status);
        test.assert_mocks();
    }

    Ok(())
}

/// Expect a network error when the provider cannot be reached
#[tokio::test]
async fn unreachable_provider_is_network_error() -> Result<(), TestError> {
    let provider = AirtableProvider::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

    let config = config();
    let result = provider
        .fetch_record(&config, &schema(&config, EntityType::Pilot), "recPilot1")
        .await;

    assert!(matches!(result, Err(ProviderError::Network { .. })));

    Ok(())
}

/// Expect validation to stop at the tables phase when a schema table is missing
#[tokio::test]
async fn validate_config_reports_missing_table() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.airtable().create_meta_tables_endpoint(
        BASE_ID,
        200,
        vec![table_meta("tbl1", PILOT_TABLE, &["Callsign", "Total Hours", "Email"])],
        1,
    );

    let result = provider(&test).validate_config(&config()).await;

    assert!(!result.success);
    assert_eq!(result.completed_phases, vec![PHASE_CREDENTIALS]);
    assert_eq!(result.failed_phases, vec![PHASE_TABLES]);
    assert_eq!(result.errors[0].detail.code, "table_not_found");
    assert!(result.errors[0].detail.message.contains(PIREP_TABLE));
    test.assert_mocks();

    Ok(())
}
