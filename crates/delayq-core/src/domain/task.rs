//! Task record: the unit of scheduled work.

use chrono::{DateTime, Utc};

use super::ids::TaskId;
use super::state::TaskStatus;

/// A scheduled task.
///
/// Design:
/// - `id`, `message`, `delay_secs` and `scheduled_at` never change after creation.
/// - Status transitions happen only through `mark_completed` / `mark_canceled`,
///   which apply at most once (from `Pending`).
/// - `completed_at` is `Some` iff the status is terminal.
///
/// The timer handle lives next to this record inside the store, never here, so
/// every clone of a `Task` is safe to hand out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub message: String,
    pub delay_secs: u32,
    pub status: TaskStatus,
    pub scheduled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, message: String, delay_secs: u32, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id,
            message,
            delay_secs,
            status: TaskStatus::Pending,
            scheduled_at,
            completed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Pending -> Completed. Returns false (and changes nothing) otherwise.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) -> bool {
        self.finish(TaskStatus::Completed, at)
    }

    /// Pending -> Canceled. Returns false (and changes nothing) otherwise.
    pub fn mark_canceled(&mut self, at: DateTime<Utc>) -> bool {
        self.finish(TaskStatus::Canceled, at)
    }

    fn finish(&mut self, status: TaskStatus, at: DateTime<Utc>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = status;
        self.completed_at = Some(at);
        true
    }
}
