use crewdesk::server::service::live_flight::LiveFlightService;

use super::*;

/// Expect a history page to be fetched once and then served from the cache
#[tokio::test]
async fn caches_history_pages() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.live().create_user_flights_endpoint("ifc-1001", 2, 1);

    let state = test.into_app_state();
    let service = LiveFlightService::new(state.cache.as_ref(), &state.live, 1);

    let first = service.get_flight_history("ifc-1001", 2).await.unwrap();
    let second = service.get_flight_history("ifc-1001", 2).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.page_index, 2);
    assert_eq!(first.data[0].origin_airport.as_deref(), Some("KJFK"));
    test.assert_mocks();

    Ok(())
}

/// Expect page 0 to be treated as the first page
#[tokio::test]
async fn clamps_page_to_first() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.live().create_user_flights_endpoint("ifc-1001", 1, 1);

    let state = test.into_app_state();
    let page = LiveFlightService::new(state.cache.as_ref(), &state.live, 1)
        .get_flight_history("ifc-1001", 0)
        .await
        .unwrap();

    assert_eq!(page.page_index, 1);
    test.assert_mocks();

    Ok(())
}
