//! Background logbook worker.
//!
//! A single task drains the [`LogbookQueue`] and runs each job through the
//! [`LogbookJobHandler`]. Failed jobs are logged and not retried. The task ends once every
//! queue handle has been dropped.

pub mod handler;
pub mod queue;

pub use handler::LogbookJobHandler;
pub use queue::LogbookQueue;

use tokio::{sync::mpsc::Receiver, task::JoinHandle};

use crate::server::model::worker::ScheduledLogbookJob;

pub struct LogbookWorker {
    rx: Receiver<ScheduledLogbookJob>,
    handler: LogbookJobHandler,
}

impl LogbookWorker {
    pub fn new(rx: Receiver<ScheduledLogbookJob>, handler: LogbookJobHandler) -> Self {
        Self { rx, handler }
    }

    /// Spawns the worker loop onto the runtime
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        tracing::info!("Logbook worker started");

        while let Some(scheduled) = self.rx.recv().await {
            if let Err(e) = self.handler.handle(&scheduled).await {
                tracing::warn!("Logbook job {} failed: {}", scheduled, e);
            }
        }

        tracing::info!("Logbook queue closed, worker stopped");
    }
}

/// Waits for a worker task and logs how it ended
///
/// # Returns
/// - `true` - The worker returned normally
/// - `false` - The worker panicked or was cancelled
pub async fn supervise(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => {
            tracing::info!("Logbook worker exited");
            true
        }
        Err(e) if e.is_panic() => {
            tracing::error!("Logbook worker panicked, history refreshes stopped: {}", e);
            false
        }
        Err(e) => {
            tracing::warn!("Logbook worker cancelled: {}", e);
            false
        }
    }
}
