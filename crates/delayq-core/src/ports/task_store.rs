//! TaskStore port - タスクレコードの正本（source of truth）
//!
//! TaskStore は以下を管理します：
//! - タスクの状態（TaskStatus と completed_at）
//! - 発火待ちのタイマーハンドル
//! - 挿入順序（一覧は schedule 呼び出し順）
//!
//! # 設計原則
//! - ストアはコントローラが所有する明示的なインスタンス（グローバルではない）
//! - 排他制御は呼び出し側（LifecycleController の Mutex）が担当

use crate::domain::{Task, TaskId};
use crate::ports::TimerHandle;

/// Store entry: the task plus its timer handle.
///
/// `timer` is `Some` iff `task.status` is pending.
#[derive(Debug)]
pub struct TaskEntry {
    pub task: Task,
    pub timer: Option<Box<dyn TimerHandle>>,
}

impl TaskEntry {
    pub fn new(task: Task, timer: Box<dyn TimerHandle>) -> Self {
        Self {
            task,
            timer: Some(timer),
        }
    }

    /// Release the timer without running its callback.
    ///
    /// Safe to call after the timer has fired.
    pub fn release_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

/// TaskStore はタスクを ID で保持し、挿入順で列挙する
pub trait TaskStore: Send {
    /// Insert, or overwrite in place (the original position is kept).
    fn put(&mut self, entry: TaskEntry);

    fn get(&self, id: &TaskId) -> Option<&TaskEntry>;

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut TaskEntry>;

    /// All entries in insertion order.
    fn list(&self) -> Vec<&TaskEntry>;

    /// Remove all entries, handing them back so their timers can be released.
    fn clear(&mut self) -> Vec<TaskEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
