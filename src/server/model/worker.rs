//! Logbook worker job definitions.
//!
//! Jobs are pushed onto the in-process [`LogbookQueue`](crate::server::worker::LogbookQueue)
//! after a PIREP is filed and consumed by the logbook worker. Each variant carries the minimal
//! data needed to perform the task.

use chrono::{DateTime, Utc};
use std::fmt;

/// Logbook job with the time it was enqueued.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledLogbookJob {
    /// The job to execute.
    pub job: LogbookJob,
    /// When the job was handed to the queue.
    pub enqueued_at: DateTime<Utc>,
}

impl ScheduledLogbookJob {
    /// Wraps a job, stamping it with the current time.
    pub fn now(job: LogbookJob) -> Self {
        Self {
            job,
            enqueued_at: Utc::now(),
        }
    }
}

impl fmt::Display for ScheduledLogbookJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (enqueued at {})", self.job, self.enqueued_at)
    }
}

/// Background jobs for pilot logbook maintenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogbookJob {
    /// Drop and re-warm the cached flight history of a pilot after they filed a PIREP.
    ///
    /// The first page is fetched again from the Live API so the next logbook view reflects
    /// the flight that was just reported.
    RefreshFlightHistory {
        /// Infinite Flight user ID whose history is refreshed.
        ifc_user_id: String,
        /// Number of cached pages to invalidate, starting at page 1.
        pages: u32,
    },
}

impl fmt::Display for LogbookJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogbookJob::RefreshFlightHistory { ifc_user_id, pages } => {
                write!(f, "RefreshFlightHistory(user: {}, pages: {})", ifc_user_id, pages)
            }
        }
    }
}
