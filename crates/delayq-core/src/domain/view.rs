//! External view of a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::TaskStatus;
use super::task::Task;

/// Task view for API responses.
///
/// This is the only serializable shape of a task. Internal timer state has no
/// field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub task_id: String,
    pub message: String,
    pub delay: u32,
    pub status: TaskStatus,
    pub scheduled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id.to_string(),
            message: task.message.clone(),
            delay: task.delay_secs,
            status: task.status,
            scheduled_at: task.scheduled_at,
            completed_at: task.completed_at,
        }
    }
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.id.to_string(),
            message: task.message,
            delay: task.delay_secs,
            status: task.status,
            scheduled_at: task.scheduled_at,
            completed_at: task.completed_at,
        }
    }
}
