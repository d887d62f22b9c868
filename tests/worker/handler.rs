use crewdesk::server::{
    model::worker::{LogbookJob, ScheduledLogbookJob},
    service::live_flight::LiveFlightService,
    worker::LogbookJobHandler,
};

use super::*;

/// Expect a cached first page to be fetched again by a refresh
#[tokio::test]
async fn refresh_refetches_first_page() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.live().create_user_flights_endpoint(IFC_USER_ID, 1, 2);

    let state = test.into_app_state();
    let history = LiveFlightService::new(state.cache.as_ref(), &state.live, 1);
    history.get_flight_history(IFC_USER_ID, 1).await.unwrap();
    history.get_flight_history(IFC_USER_ID, 1).await.unwrap();

    let handler = LogbookJobHandler::new(state.cache.clone(), state.live.clone());
    handler
        .handle(&ScheduledLogbookJob::now(LogbookJob::RefreshFlightHistory {
            ifc_user_id: IFC_USER_ID.to_string(),
            pages: 1,
        }))
        .await
        .unwrap();

    // Served from the refreshed cache entry
    history.get_flight_history(IFC_USER_ID, 1).await.unwrap();
    test.assert_mocks();

    Ok(())
}

/// Expect later pages to be dropped from the cache without being fetched
#[tokio::test]
async fn refresh_drops_later_pages() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.live().create_user_flights_endpoint(IFC_USER_ID, 1, 1);
    test.live().create_user_flights_endpoint(IFC_USER_ID, 2, 2);

    let state = test.into_app_state();
    let history = LiveFlightService::new(state.cache.as_ref(), &state.live, 1);
    let before = history.get_flight_history(IFC_USER_ID, 2).await.unwrap();
    assert_eq!(before.page_index, 2);

    LogbookJobHandler::new(state.cache.clone(), state.live.clone())
        .refresh_flight_history(IFC_USER_ID, 2)
        .await
        .unwrap();

    history.get_flight_history(IFC_USER_ID, 2).await.unwrap();
    test.assert_mocks();

    Ok(())
}

/// Expect the Live API failure to be returned to the worker
#[tokio::test]
async fn refresh_fails_when_live_api_fails() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let state = test.into_app_state();
    let result = LogbookJobHandler::new(state.cache.clone(), state.live.clone())
        .refresh_flight_history(IFC_USER_ID, 1)
        .await;

    assert!(result.is_err());

    Ok(())
}
