//! Status - ステータス別の件数

use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub pending: usize,
    pub completed: usize,
    pub canceled: usize,
    pub total: usize,
}

impl TaskCounts {
    pub fn record(&mut self, task: &Task) {
        match task.status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::Canceled => self.canceled += 1,
        }
        self.total += 1;
    }
}

impl<'a> FromIterator<&'a Task> for TaskCounts {
    fn from_iter<I: IntoIterator<Item = &'a Task>>(iter: I) -> Self {
        let mut counts = TaskCounts::default();
        iter.into_iter().for_each(|task| counts.record(task));
        counts
    }
}
