//! Tests for the submit_pirep endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crewdesk::{model::pirep::PirepSubmitDto, server::controller::pirep::submit_pirep};
use crewdesk_test_utils::{
    fixtures::{factory::PIREP_TABLE, live::live_flight},
    TestContext,
};

use super::*;

async fn setup_va(test: &mut TestContext, linked: bool) -> Result<i32, TestError> {
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;
    test.va().insert_route(va.id, "Career Route", "recRoute1").await?;
    test.va()
        .insert_provider_config(va.id, factory::airtable_config(BASE_ID))
        .await?;

    let user = test.user().insert_user(DISCORD_ID, Some("pilot")).await?;
    if linked {
        test.user()
            .insert_synced_membership(user.id, va.id, "123", "recPilot1")
            .await?;
    } else {
        test.user().insert_membership(user.id, va.id, "123").await?;
    }

    Ok(va.id)
}

fn career_request() -> Json<PirepSubmitDto> {
    Json(PirepSubmitDto {
        mode: "career".to_string(),
        flight_time: Some("01:15".to_string()),
        ..Default::default()
    })
}

/// Expect 201 Created when the PIREP is written
#[tokio::test]
async fn created_on_success() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, true).await?;
    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    test.live().create_session_flights_endpoint(
        "session-1",
        vec![live_flight("flight-1", "DAL123", "livery-1")],
        1,
    );
    test.live()
        .create_flight_plan_endpoint("session-1", "flight-1", &["KJFK", "EGLL"], 1);
    test.airtable()
        .create_record_endpoint(BASE_ID, PIREP_TABLE, 200, "recPirep1", None, 1);

    let result = submit_pirep(
        State(test.into_app_state()),
        caller(),
        Path(va_id),
        career_request(),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    test.assert_mocks();

    Ok(())
}

/// Expect 400 Bad Request when the pilot record is not linked
#[tokio::test]
async fn bad_request_for_unlinked_pilot() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, false).await?;

    let result = submit_pirep(
        State(test.into_app_state()),
        caller(),
        Path(va_id),
        career_request(),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 502 Bad Gateway when Airtable rejects the write
#[tokio::test]
async fn bad_gateway_for_provider_failure() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, true).await?;
    test.airtable()
        .create_record_endpoint(BASE_ID, PIREP_TABLE, 500, "", None, 1);

    let result = submit_pirep(
        State(test.into_app_state()),
        caller(),
        Path(va_id),
        career_request(),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    test.assert_mocks();

    Ok(())
}

/// Expect 404 Not Found for an unknown VA
#[tokio::test]
async fn not_found_for_unknown_va() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let result = submit_pirep(
        State(test.into_app_state()),
        caller(),
        Path(42),
        career_request(),
    )
    .await;

    assert!(result.is_err());
    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
