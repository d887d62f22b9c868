//! Tests for the virtual airline endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crewdesk::{
    model::provider::SaveProviderConfigDto,
    server::controller::va::{
        get_live_flights, save_flight_modes, save_provider_config, validate_provider_config,
    },
};
use crewdesk_test_utils::fixtures::live::live_flight;
use serde_json::json;

use super::*;

/// Expect 200 OK with the stored modes for a well-formed payload
#[tokio::test]
async fn save_flight_modes_ok() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va = test.va().insert_va("900", None).await?;

    let result = save_flight_modes(
        State(test.into_app_state()),
        caller(),
        Path(va.id),
        Json(factory::flight_modes()),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 422 Unprocessable Entity for a malformed flight mode
#[tokio::test]
async fn save_flight_modes_rejects_malformed_mode() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va = test.va().insert_va("900", None).await?;

    let result = save_flight_modes(
        State(test.into_app_state()),
        caller(),
        Path(va.id),
        Json(json!({ "career": { "enabled": "yes" } })),
    )
    .await;

    assert!(result.is_err());
    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect 200 OK when a valid provider configuration is stored
#[tokio::test]
async fn save_provider_config_ok() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let result = save_provider_config(
        State(test.into_app_state()),
        caller(),
        Path(1),
        Json(SaveProviderConfigDto {
            config: factory::airtable_config(BASE_ID),
            features_enabled: Vec::new(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 422 Unprocessable Entity for an unsupported provider type
#[tokio::test]
async fn save_provider_config_rejects_unknown_provider() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let mut config = factory::airtable_config(BASE_ID);
    config["providerType"] = json!("notion");
    let result = save_provider_config(
        State(test.into_app_state()),
        caller(),
        Path(1),
        Json(SaveProviderConfigDto {
            config,
            features_enabled: Vec::new(),
        }),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect 404 Not Found when validating a VA without provider configuration
#[tokio::test]
async fn validate_provider_config_without_config() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let result = validate_provider_config(State(test.into_app_state()), caller(), Path(1)).await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 200 OK with the VA's live flights
#[tokio::test]
async fn get_live_flights_ok() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va = test.va().insert_va("900", None).await?;
    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    test.live().create_session_flights_endpoint(
        "session-1",
        vec![live_flight("flight-1", "DAL123", "livery-1")],
        1,
    );
    test.live()
        .create_flight_plan_endpoint("session-1", "flight-1", &["KATL", "KLAX"], 1);

    let result = get_live_flights(State(test.into_app_state()), Path(va.id)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    test.assert_mocks();

    Ok(())
}

/// Expect 404 Not Found for an unknown VA
#[tokio::test]
async fn get_live_flights_unknown_va() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let result = get_live_flights(State(test.into_app_state()), Path(42)).await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
