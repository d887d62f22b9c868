use crewdesk::{
    model::pirep::PirepSubmitDto,
    server::{
        error::Error,
        model::{app::AppState, worker::LogbookJob},
        service::pirep::PirepService,
    },
};
use crewdesk_test_utils::{
    fixtures::{factory::PIREP_TABLE, live::live_flight},
    TestContext,
};

use super::*;

/// Inserts the VA with both flight modes, its career route, one livery mapping, the Airtable
/// configuration and the pilot `DAL123`; returns the VA ID
async fn setup_va(test: &mut TestContext, linked: bool) -> Result<i32, TestError> {
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;
    test.va().insert_route(va.id, "Career Route", "recRoute1").await?;
    test.va()
        .insert_livery_mapping(va.id, "livery-1", "Boeing 777-300ER", "Delta")
        .await?;
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

fn service(state: &AppState) -> PirepService<'_> {
    PirepService::new(
        &state.db,
        state.cache.as_ref(),
        &state.live,
        &state.providers,
        &state.logbook_queue,
    )
}

fn career_request() -> PirepSubmitDto {
    PirepSubmitDto {
        mode: "career".to_string(),
        flight_time: Some("02:00".to_string()),
        remarks: Some("Smooth flight".to_string()),
        ..Default::default()
    }
}

/// Expect a PIREP with the bot metadata block in its remarks when the pilot is linked and
/// flying
#[tokio::test]
async fn submits_with_bot_metadata_when_pilot_is_flying() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, true).await?;

    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    test.live().create_session_flights_endpoint(
        "session-1",
        vec![
            live_flight("flight-1", "DAL123", "livery-1"),
            live_flight("flight-2", "UAL45", "livery-2"),
        ],
        1,
    );
    test.live()
        .create_flight_plan_endpoint("session-1", "flight-1", &["KJFK", "MERIT", "EGLL"], 1);
    test.airtable().create_record_endpoint(
        BASE_ID,
        PIREP_TABLE,
        200,
        "recPirep1",
        Some(concat!(
            r"Actual Flight Time: 02:00\\nMultiplier: 1\.5x\\nRoute: KJFK-EGLL",
            r"\\nAircraft: Boeing 777-300ER\\nLivery: Delta \(livery-1\)"
        )),
        1,
    );

    let (state, mut rx) = test.into_app_state_with_queue();
    let result = service(&state)
        .submit(va_id, DISCORD_ID, &career_request())
        .await
        .unwrap();

    assert!(result.success, "{:?}", result);
    assert_eq!(result.pirep_id.as_deref(), Some("recPirep1"));
    assert_eq!(
        rx.try_recv().map(|scheduled| scheduled.job).ok(),
        Some(LogbookJob::RefreshFlightHistory {
            ifc_user_id: format!("ifc-{}", DISCORD_ID),
            pages: 1,
        })
    );
    test.assert_mocks();

    Ok(())
}

/// Expect a validation error and no provider write when a route-selection mode gets no route
#[tokio::test]
async fn rejects_missing_route_without_writing() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, true).await?;
    test.airtable()
        .create_record_endpoint(BASE_ID, PIREP_TABLE, 200, "recPirep1", None, 0);

    let state = test.into_app_state();
    let request = PirepSubmitDto {
        mode: "charter".to_string(),
        flight_time: Some("01:30".to_string()),
        passengers: Some(180),
        ..Default::default()
    };
    let result = service(&state).submit(va_id, DISCORD_ID, &request).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.error_type.as_deref(), Some("validation_error"));
    assert_eq!(
        result.error_message.as_deref(),
        Some("Route selection is required for Charter, please select a route")
    );
    test.assert_mocks();

    Ok(())
}

/// Expect a validation error naming the missing link when the membership has no pilot record
#[tokio::test]
async fn rejects_unlinked_pilot() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, false).await?;
    test.airtable()
        .create_record_endpoint(BASE_ID, PIREP_TABLE, 200, "recPirep1", None, 0);

    let state = test.into_app_state();
    let result = service(&state)
        .submit(va_id, DISCORD_ID, &career_request())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error_type.as_deref(), Some("validation_error"));
    assert!(result
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("Pilot record not linked")));
    test.assert_mocks();

    Ok(())
}

/// Expect a provider error with the rate limit code when Airtable answers 429
#[tokio::test]
async fn surfaces_provider_rate_limit() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, true).await?;
    test.airtable()
        .create_record_endpoint(BASE_ID, PIREP_TABLE, 429, "", None, 1);

    let state = test.into_app_state();
    let result = service(&state)
        .submit(va_id, DISCORD_ID, &career_request())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error_type.as_deref(), Some("provider_error"));
    assert_eq!(result.error_code.as_deref(), Some("rate_limited"));
    assert!(result.pirep_id.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect unknown and disabled modes to be told apart
#[tokio::test]
async fn rejects_unknown_and_disabled_modes() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let mut modes = factory::flight_modes();
    modes["charter"]["enabled"] = serde_json::Value::Bool(false);
    let va = test.va().insert_va("901", Some(modes)).await?;

    let state = test.into_app_state();
    let unknown = service(&state)
        .submit(
            va.id,
            DISCORD_ID,
            &PirepSubmitDto {
                mode: "Career".to_string(),
                ..career_request()
            },
        )
        .await
        .unwrap();
    let disabled = service(&state)
        .submit(
            va.id,
            DISCORD_ID,
            &PirepSubmitDto {
                mode: "charter".to_string(),
                ..career_request()
            },
        )
        .await
        .unwrap();

    assert_eq!(unknown.error_message.as_deref(), Some("Unknown flight mode Career"));
    assert_eq!(disabled.error_message.as_deref(), Some("Charter is currently disabled"));

    Ok(())
}

/// Expect a missing flight time to be reported before anything is looked up
#[tokio::test]
async fn requires_flight_time() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let va_id = setup_va(&mut test, true).await?;

    let state = test.into_app_state();
    let request = PirepSubmitDto {
        flight_time: None,
        ..career_request()
    };
    let result = service(&state).submit(va_id, DISCORD_ID, &request).await.unwrap();

    assert_eq!(result.error_message.as_deref(), Some("Flight time is required"));

    Ok(())
}

/// Expect NotFound for a VA that does not exist
#[tokio::test]
async fn unknown_va_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;

    let state = test.into_app_state();
    let result = service(&state).submit(42, DISCORD_ID, &career_request()).await;

    assert!(matches!(result, Err(Error::NotFound(_))));

    Ok(())
}
