use crewdesk::server::{
    error::Error,
    service::{live_flight::LiveFlightService, va::VirtualAirlineService},
};
use crewdesk_test_utils::fixtures::live::live_flight;

use super::*;

/// Expect only the VA's flights, in roster order, with routes from their flight plans
#[tokio::test]
async fn lists_va_flights_with_routes() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::VirtualAirline)
        .build()
        .await?;
    let va = test.va().insert_va("900", None).await?;
    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    test.live().create_session_flights_endpoint(
        "session-1",
        vec![
            live_flight("flight-1", "DAL123", "livery-1"),
            live_flight("flight-2", "UAL45", "livery-2"),
            live_flight("flight-3", "Delta 77", "livery-1"),
            live_flight("flight-4", "DAL8 Heavy", "livery-1"),
        ],
        1,
    );
    test.live()
        .create_flight_plan_endpoint("session-1", "flight-1", &["KJFK", "EGLL"], 1);
    test.live()
        .create_flight_plan_endpoint("session-1", "flight-4", &["WPT01", "KLAX"], 1);

    let state = test.into_app_state();
    let config = VirtualAirlineService::new(&state.db, state.cache.as_ref())
        .get_config(va.id)
        .await
        .unwrap();
    let flights = LiveFlightService::new(state.cache.as_ref(), &state.live, 2)
        .get_va_live_flights(&config)
        .await
        .unwrap();

    let summary: Vec<(&str, &str, &str)> = flights
        .iter()
        .map(|f| (f.flight_id.as_str(), f.origin.as_str(), f.destination.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("flight-1", "KJFK", "EGLL"), ("flight-4", "", "KLAX")]
    );
    test.assert_mocks();

    Ok(())
}

/// Expect every route, in roster order, when there are more flights than the
/// flight plan concurrency limit
#[tokio::test]
async fn routes_keep_roster_order_above_concurrency_limit() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::VirtualAirline)
        .build()
        .await?;
    let va = test.va().insert_va("900", None).await?;
    test.live().create_sessions_endpoint("session-1", "Expert", 1);
    let destinations = ["EGLL", "LFPG", "EDDF", "EHAM", "LEMD"];
    test.live().create_session_flights_endpoint(
        "session-1",
        (0..destinations.len())
            .map(|i| live_flight(&format!("flight-{i}"), &format!("DAL{i}"), "livery-1"))
            .collect(),
        1,
    );
    for (i, destination) in destinations.iter().enumerate() {
        test.live().create_flight_plan_endpoint(
            "session-1",
            &format!("flight-{i}"),
            &["KJFK", *destination],
            1,
        );
    }

    let state = test.into_app_state();
    let config = VirtualAirlineService::new(&state.db, state.cache.as_ref())
        .get_config(va.id)
        .await
        .unwrap();
    let flights = LiveFlightService::new(state.cache.as_ref(), &state.live, 2)
        .get_va_live_flights(&config)
        .await
        .unwrap();

    let summary: Vec<(&str, &str)> = flights
        .iter()
        .map(|f| (f.flight_id.as_str(), f.destination.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("flight-0", "EGLL"),
            ("flight-1", "LFPG"),
            ("flight-2", "EDDF"),
            ("flight-3", "EHAM"),
            ("flight-4", "LEMD"),
        ]
    );
    test.assert_mocks();

    Ok(())
}

/// Expect NotFound when the VA's game server is not online
#[tokio::test]
async fn offline_game_server_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::VirtualAirline)
        .build()
        .await?;
    let va = test.va().insert_va("900", None).await?;
    test.live().create_sessions_endpoint("session-1", "Casual", 1);

    let state = test.into_app_state();
    let config = VirtualAirlineService::new(&state.db, state.cache.as_ref())
        .get_config(va.id)
        .await
        .unwrap();

    assert!(matches!(
        LiveFlightService::new(state.cache.as_ref(), &state.live, 2)
            .get_va_live_flights(&config)
            .await,
        Err(Error::NotFound(_))
    ));

    Ok(())
}
