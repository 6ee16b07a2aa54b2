//! LifecycleController - タスクのライフサイクル管理
//!
//! # 状態遷移
//! - pending --(timer 発火, まだ pending)--> completed
//! - pending --(cancel_task)--> canceled
//! - completed / canceled は終端
//!
//! # 発火とキャンセルの競合
//! どちらもストアの Mutex を持ったまま「pending か確認 → 遷移」を行うので、
//! 両方が pending を観測して両方が遷移することはありません。
//! キャンセル側は遷移の前にタイマーハンドルを cancel します。

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::config::SchedulerConfig;
use super::status::TaskCounts;
use crate::domain::{
    CancelOutcome, CancelResult, SchedulerError, Task, TaskId, TaskStatus, TaskView,
};
use crate::ports::{Clock, FireCallback, IdGenerator, TaskEntry, TaskStore, Timer};

pub(crate) type SharedStore = Arc<Mutex<Box<dyn TaskStore>>>;

/// LifecycleController はタスクの作成・キャンセル・参照を担う
///
/// 構築は `ControllerBuilder` で行います。インスタンスごとに独立したストアを
/// 持つので、複数のコントローラを同時に動かせます。
pub struct LifecycleController {
    store: SharedStore,
    timer: Arc<dyn Timer>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    config: SchedulerConfig,
}

impl LifecycleController {
    pub(crate) fn new(
        store: Box<dyn TaskStore>,
        timer: Arc<dyn Timer>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            timer,
            clock,
            ids,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Create a pending task that completes after `delay_secs`.
    ///
    /// Input is assumed validated: non-empty message, delay within
    /// `config().max_delay_secs`.
    pub fn schedule_task(&self, message: impl Into<String>, delay_secs: u32) -> Task {
        let id = self.ids.generate_task_id();
        let task = Task::new(id, message.into(), delay_secs, self.clock.now());

        // 登録とストアへの追加を同じロック内で行い、発火側が必ずレコードを見つけられるようにする
        let mut store = self.store.lock();
        let timer = self.timer.schedule(
            Duration::from_secs(u64::from(delay_secs)),
            self.completion_handler(id),
        );
        store.put(TaskEntry::new(task.clone(), timer));
        drop(store);

        debug!(task_id = %id, delay_secs, "task scheduled");
        task
    }

    /// Cancel a pending task.
    ///
    /// - pending: timer released, status -> canceled
    /// - canceled: unchanged, `AlreadyCanceled`
    /// - completed: unchanged, `Conflict`
    pub fn cancel_task(&self, id: &TaskId) -> Result<CancelResult, SchedulerError> {
        let mut store = self.store.lock();
        let entry = store.get_mut(id).ok_or(SchedulerError::NotFound(*id))?;

        let outcome = match entry.task.status {
            TaskStatus::Completed => CancelOutcome::Conflict,
            TaskStatus::Canceled => CancelOutcome::AlreadyCanceled,
            TaskStatus::Pending => {
                entry.release_timer();
                entry.task.mark_canceled(self.clock.now());
                CancelOutcome::Canceled
            }
        };
        let task = entry.task.clone();
        drop(store);

        debug!(task_id = %id, ?outcome, "cancel requested");
        Ok(CancelResult { task, outcome })
    }

    /// All tasks in schedule order, with their current status.
    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.store
            .lock()
            .list()
            .into_iter()
            .map(|entry| entry.task.clone())
            .collect()
    }

    pub fn get_task_by_id(&self, id: &TaskId) -> Result<Task, SchedulerError> {
        self.store
            .lock()
            .get(id)
            .map(|entry| entry.task.clone())
            .ok_or(SchedulerError::NotFound(*id))
    }

    /// Projection safe to hand to callers (no timer state).
    pub fn to_external_view(task: &Task) -> TaskView {
        TaskView::from(task)
    }

    /// Release every outstanding timer, then empty the store.
    ///
    /// Returns the number of timers released.
    pub fn clear_all(&self) -> usize {
        let mut store = self.store.lock();
        let mut entries = store.clear();
        let released = entries.iter().filter(|entry| entry.timer.is_some()).count();
        entries.iter_mut().for_each(TaskEntry::release_timer);
        drop(store);

        debug!(removed = entries.len(), released, "store cleared");
        released
    }

    pub fn counts(&self) -> TaskCounts {
        let store = self.store.lock();
        store.list().into_iter().map(|entry| &entry.task).collect()
    }

    /// The fire-callback for one task.
    ///
    /// Holds the store weakly: a callback that outlives the controller, or
    /// whose record was removed by `clear_all`, does nothing.
    fn completion_handler(&self, id: TaskId) -> FireCallback {
        let store: Weak<Mutex<Box<dyn TaskStore>>> = Arc::downgrade(&self.store);
        let clock = Arc::clone(&self.clock);

        Box::new(move || {
            let Some(store) = store.upgrade() else {
                return;
            };
            let mut guard = store.lock();
            let Some(entry) = guard.get_mut(&id) else {
                return;
            };
            if entry.task.mark_completed(clock.now()) {
                entry.timer = None;
                info!(task_id = %id, message = %entry.task.message, "task completed");
            }
        })
    }
}

/// 破棄時に残っているタイマーも解放する（TokioTimer の sleep タスクを残さない）
impl Drop for LifecycleController {
    fn drop(&mut self) {
        self.clear_all();
    }
}

impl std::fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController")
            .field("tasks", &self.store.lock().len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
