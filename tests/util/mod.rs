//! Builds application state pointed at the test context's mock server.

use std::{sync::Arc, time::Duration};

use crewdesk::server::{
    cache::InMemoryCache,
    live::LiveApiClient,
    model::{app::AppState, worker::ScheduledLogbookJob},
    provider::{AirtableProvider, ProviderRegistry},
    worker::LogbookQueue,
};
use crewdesk_test_utils::{context::TEST_LIVE_API_KEY, TestContext};
use tokio::sync::mpsc::Receiver;

const TEST_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Extension trait for TestContext to create AppState against the mock server
pub trait TestContextExt {
    /// State with a fresh in-memory cache; logbook jobs are dropped
    fn into_app_state(&self) -> AppState;

    /// State with a fresh in-memory cache and the consumer side of its logbook queue
    fn into_app_state_with_queue(&self) -> (AppState, Receiver<ScheduledLogbookJob>);
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with_queue().0
    }

    fn into_app_state_with_queue(&self) -> (AppState, Receiver<ScheduledLogbookJob>) {
        let url = self.server_url();

        let live = LiveApiClient::new(&url, TEST_LIVE_API_KEY, TEST_HTTP_TIMEOUT)
            .expect("Failed to build Live API client");
        let airtable = AirtableProvider::new(&url, TEST_HTTP_TIMEOUT)
            .expect("Failed to build Airtable provider");
        let (logbook_queue, rx) = LogbookQueue::new(16);

        let state = AppState {
            db: self.db.clone(),
            cache: Arc::new(InMemoryCache::new()),
            live,
            providers: ProviderRegistry::new().with(Arc::new(airtable)),
            logbook_queue,
            flight_plan_concurrency: 2,
        };

        (state, rx)
    }
}
