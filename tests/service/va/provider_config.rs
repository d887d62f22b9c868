use crewdesk::server::{
    data::va::provider_config::ProviderConfigRepository,
    service::provider_config::ProviderConfigService,
};
use crewdesk_test_utils::fixtures::{
    airtable::table_meta,
    factory::{PILOT_TABLE, PIREP_TABLE},
};

use super::*;

const PILOT_COLUMNS: &[&str] = &["Callsign", "Total Hours", "Email"];
const PIREP_COLUMNS: &[&str] = &[
    "Pilot",
    "Aircraft",
    "Route",
    "Mode",
    "Flight Time",
    "Date",
    "Fuel",
    "Remarks",
];

/// Expect every phase to pass and the version to be marked valid when the base matches
#[tokio::test]
async fn matching_base_is_valid() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::DataProviderConfig)
        .build()
        .await?;
    test.va()
        .insert_provider_config(1, factory::airtable_config(BASE_ID))
        .await?;
    test.airtable().create_meta_tables_endpoint(
        BASE_ID,
        200,
        vec![
            table_meta("tbl1", PILOT_TABLE, PILOT_COLUMNS),
            table_meta("tbl2", PIREP_TABLE, PIREP_COLUMNS),
        ],
        1,
    );

    let state = test.into_app_state();
    let result = ProviderConfigService::new(&state.db, state.cache.as_ref(), &state.providers)
        .validate_connectivity(1)
        .await
        .unwrap();

    assert!(result.success, "{:?}", result);
    assert_eq!(result.completed_phases, vec!["credentials", "tables", "fields"]);

    let stored = ProviderConfigRepository::new(&test.db).get_active(1).await?;
    assert_eq!(stored.map(|c| c.validation_status).as_deref(), Some("valid"));
    test.assert_mocks();

    Ok(())
}

/// Expect a missing column to fail the fields phase and mark the version invalid
#[tokio::test]
async fn missing_column_is_invalid() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::DataProviderConfig)
        .build()
        .await?;
    test.va()
        .insert_provider_config(1, factory::airtable_config(BASE_ID))
        .await?;
    test.airtable().create_meta_tables_endpoint(
        BASE_ID,
        200,
        vec![
            table_meta("tbl1", PILOT_TABLE, &["Callsign"]),
            table_meta("tbl2", PIREP_TABLE, PIREP_COLUMNS),
        ],
        1,
    );

    let state = test.into_app_state();
    let result = ProviderConfigService::new(&state.db, state.cache.as_ref(), &state.providers)
        .validate_connectivity(1)
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.failed_phases, vec!["fields"]);
    assert_eq!(result.errors[0].detail.code, "field_not_found");

    let stored = ProviderConfigRepository::new(&test.db).get_active(1).await?;
    assert_eq!(stored.map(|c| c.validation_status).as_deref(), Some("invalid"));

    Ok(())
}

/// Expect rejected credentials to stop validation at the first phase
#[tokio::test]
async fn rejected_credentials_stop_validation() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::DataProviderConfig)
        .build()
        .await?;
    test.va()
        .insert_provider_config(1, factory::airtable_config(BASE_ID))
        .await?;
    test.airtable()
        .create_meta_tables_endpoint(BASE_ID, 401, Vec::new(), 1);

    let state = test.into_app_state();
    let result = ProviderConfigService::new(&state.db, state.cache.as_ref(), &state.providers)
        .validate_connectivity(1)
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.completed_phases.is_empty());
    assert_eq!(result.failed_phases, vec!["credentials"]);
    assert_eq!(result.errors[0].detail.code, "invalid_credentials");
    test.assert_mocks();

    Ok(())
}
