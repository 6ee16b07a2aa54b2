//! InMemoryTaskStore - プロセス内のタスクストア
//!
//! # 実装詳細
//! - HashMap<TaskId, TaskEntry> が正本
//! - Vec<TaskId> で挿入順を保持（レコードは個別削除されないので順序は単調）

use std::collections::HashMap;

use crate::domain::TaskId;
use crate::ports::{TaskEntry, TaskStore};

#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    entries: HashMap<TaskId, TaskEntry>,
    order: Vec<TaskId>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn put(&mut self, entry: TaskEntry) {
        let id = entry.task.id;
        if self.entries.insert(id, entry).is_none() {
            self.order.push(id);
        }
    }

    fn get(&self, id: &TaskId) -> Option<&TaskEntry> {
        self.entries.get(id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut TaskEntry> {
        self.entries.get_mut(id)
    }

    fn list(&self) -> Vec<&TaskEntry> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .collect()
    }

    fn clear(&mut self) -> Vec<TaskEntry> {
        let mut entries = std::mem::take(&mut self.entries);
        std::mem::take(&mut self.order)
            .into_iter()
            .filter_map(|id| entries.remove(&id))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
