use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::Cache, live::LiveApiClient, provider::ProviderRegistry, worker::LogbookQueue,
};

/// Shared state handed to every request handler.
///
/// All members are cheap to clone and shared by reference across requests.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: Arc<dyn Cache>,
    pub live: LiveApiClient,
    pub providers: ProviderRegistry,
    pub logbook_queue: LogbookQueue,
    /// Maximum concurrent flight plan requests when enriching a live roster
    pub flight_plan_concurrency: usize,
}
