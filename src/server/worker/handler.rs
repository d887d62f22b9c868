use std::sync::Arc;

use crate::server::{
    cache::{keys, Cache},
    error::Error,
    live::LiveApiClient,
    model::worker::{LogbookJob, ScheduledLogbookJob},
    service::live_flight::LiveFlightService,
};

/// Executes logbook jobs taken from the queue
pub struct LogbookJobHandler {
    cache: Arc<dyn Cache>,
    live: LiveApiClient,
}

impl LogbookJobHandler {
    pub fn new(cache: Arc<dyn Cache>, live: LiveApiClient) -> Self {
        Self { cache, live }
    }

    /// Dispatches a job to its handler method
    pub async fn handle(&self, scheduled: &ScheduledLogbookJob) -> Result<(), Error> {
        match &scheduled.job {
            LogbookJob::RefreshFlightHistory { ifc_user_id, pages } => {
                self.refresh_flight_history(ifc_user_id, *pages).await
            }
        }
    }

    /// Drops the user's cached history pages and fetches the first page again
    pub async fn refresh_flight_history(&self, ifc_user_id: &str, pages: u32) -> Result<(), Error> {
        tracing::debug!("Refreshing flight history for user {}", ifc_user_id);

        for page in 1..=pages.max(1) {
            self.cache
                .invalidate(&keys::flight_history(ifc_user_id, page))
                .await;
        }

        LiveFlightService::new(self.cache.as_ref(), &self.live, 1)
            .get_flight_history(ifc_user_id, 1)
            .await
            .map_err(|e| {
                tracing::error!("Failed to refresh flight history for {}: {}", ifc_user_id, e);
                e
            })?;

        tracing::debug!("Refreshed flight history for user {}", ifc_user_id);

        Ok(())
    }
}
