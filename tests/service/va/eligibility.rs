use crewdesk::server::{error::Error, model::app::AppState, service::flight_mode::FlightModeService};
use crewdesk_test_utils::{fixtures::live::live_flight, TestContext};

use super::*;

/// Inserts the VA and pilot `DAL123`, and serves a live flight for them along `waypoints`
async fn setup_flying_pilot(test: &mut TestContext, waypoints: &[&str]) -> Result<i32, TestError> {
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;
    let user = test.user().insert_user(DISCORD_ID, Some("pilot")).await?;
    test.user().insert_membership(user.id, va.id, "123").await?;

    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    test.live().create_session_flights_endpoint(
        "session-1",
        vec![live_flight("flight-1", "DAL123", "livery-1")],
        1,
    );
    test.live()
        .create_flight_plan_endpoint("session-1", "flight-1", waypoints, 1);

    Ok(va.id)
}

fn service(state: &AppState) -> FlightModeService<'_> {
    FlightModeService::new(&state.db, state.cache.as_ref(), &state.live)
}

/// Expect an exact-match mode to accept a flight on an allowed route
#[tokio::test]
async fn allowed_route_is_eligible() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_flying_pilot(&mut test, &["KJFK", "MERIT", "EGLL"]).await?;

    let state = test.into_app_state();
    let eligibility = service(&state)
        .check_eligibility(va_id, DISCORD_ID, "charter")
        .await
        .unwrap();

    assert!(eligibility.valid);
    assert_eq!(eligibility.current_route, "KJFK-EGLL");
    assert!(eligibility.error_message.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect an exact-match mode to reject a route outside its list
#[tokio::test]
async fn other_route_is_not_eligible() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_flying_pilot(&mut test, &["KJFK", "KLAX"]).await?;

    let state = test.into_app_state();
    let eligibility = service(&state)
        .check_eligibility(va_id, DISCORD_ID, "charter")
        .await
        .unwrap();

    assert!(!eligibility.valid);
    assert_eq!(eligibility.current_route, "KJFK-KLAX");
    assert!(eligibility.error_message.is_some());

    Ok(())
}

/// Expect an unknown mode to be reported ineligible without a live lookup
#[tokio::test]
async fn unknown_mode_is_not_eligible() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;

    let state = test.into_app_state();
    let eligibility = service(&state)
        .check_eligibility(va.id, DISCORD_ID, "ferry")
        .await
        .unwrap();

    assert!(!eligibility.valid);
    assert_eq!(eligibility.error_message.as_deref(), Some("Unknown flight mode ferry"));

    Ok(())
}

/// Expect a disabled mode to be reported by display name, matching the submission wording
#[tokio::test]
async fn disabled_mode_is_not_eligible() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let mut modes = factory::flight_modes();
    modes["charter"]["enabled"] = serde_json::Value::Bool(false);
    let va = test.va().insert_va("900", Some(modes)).await?;

    let state = test.into_app_state();
    let eligibility = service(&state)
        .check_eligibility(va.id, DISCORD_ID, "charter")
        .await
        .unwrap();

    assert!(!eligibility.valid);
    assert_eq!(
        eligibility.error_message.as_deref(),
        Some("Charter is currently disabled")
    );

    Ok(())
}

/// Expect NotFound when the pilot has no live flight
#[tokio::test]
async fn pilot_not_flying_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;
    let user = test.user().insert_user(DISCORD_ID, Some("pilot")).await?;
    test.user().insert_membership(user.id, va.id, "123").await?;
    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    test.live().create_session_flights_endpoint(
        "session-1",
        vec![live_flight("flight-9", "DAL999", "livery-1")],
        1,
    );

    let state = test.into_app_state();

    assert!(matches!(
        service(&state).check_eligibility(va.id, DISCORD_ID, "career").await,
        Err(Error::NotFound(_))
    ));
    test.assert_mocks();

    Ok(())
}
