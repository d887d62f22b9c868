//! Bounded in-process queue for logbook jobs.
//!
//! The queue is constructed once at startup and handed to the services that produce jobs.
//! Producers never wait: when the queue is full the job is dropped and logged, which keeps
//! PIREP submission latency independent of the worker's backlog.

use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

use crate::server::model::worker::{LogbookJob, ScheduledLogbookJob};

/// Producer side of the logbook queue; cheap to clone
#[derive(Debug, Clone)]
pub struct LogbookQueue {
    tx: Sender<ScheduledLogbookJob>,
}

impl LogbookQueue {
    /// Creates a queue holding at most `capacity` pending jobs, returning the consumer side
    /// for the [`LogbookWorker`](super::LogbookWorker)
    pub fn new(capacity: usize) -> (Self, Receiver<ScheduledLogbookJob>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        (Self { tx }, rx)
    }

    /// Enqueues a job without waiting.
    ///
    /// # Returns
    /// - `true` - Job accepted
    /// - `false` - Queue full or worker stopped; the job was dropped
    pub fn try_enqueue(&self, job: LogbookJob) -> bool {
        match self.tx.try_send(ScheduledLogbookJob::now(job)) {
            Ok(()) => true,
            Err(TrySendError::Full(scheduled)) => {
                tracing::warn!("Logbook queue is full, dropping job {}", scheduled);
                false
            }
            Err(TrySendError::Closed(scheduled)) => {
                tracing::warn!("Logbook worker is not running, dropping job {}", scheduled);
                false
            }
        }
    }
}
