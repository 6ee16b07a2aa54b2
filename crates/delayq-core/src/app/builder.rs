//! ControllerBuilder - LifecycleController の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - ports の差し替え（テストでは ManualTimer / FixedClock）

use std::sync::Arc;

use super::config::SchedulerConfig;
use super::controller::LifecycleController;
use crate::impls::{InMemoryTaskStore, TokioTimer};
use crate::ports::{Clock, IdGenerator, SystemClock, TaskStore, Timer, UlidGenerator};

/// ControllerBuilder は LifecycleController を構築
///
/// # 使用例
/// ```ignore
/// let controller = ControllerBuilder::new()
///     .config(SchedulerConfig::default())
///     .build()?;
/// ```
///
/// # デフォルト
/// - Clock: SystemClock
/// - Timer: 呼び出し元の tokio ランタイム上の TokioTimer
/// - IdGenerator: Clock を使う UlidGenerator
/// - TaskStore: InMemoryTaskStore
pub struct ControllerBuilder {
    config: SchedulerConfig,
    clock: Option<Arc<dyn Clock>>,
    timer: Option<Arc<dyn Timer>>,
    ids: Option<Arc<dyn IdGenerator>>,
    store: Option<Box<dyn TaskStore>>,
}

/// BuildError は構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no timer was given and there is no tokio runtime to run the default one")]
    NoRuntime,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            clock: None,
            timer: None,
            ids: None,
            store: None,
        }
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn timer(mut self, timer: impl Timer + 'static) -> Self {
        self.timer = Some(Arc::new(timer));
        self
    }

    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    pub fn store(mut self, store: impl TaskStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// # 検証
    /// - Timer 未指定なら tokio ランタイム内で呼ばれている必要がある
    pub fn build(self) -> Result<LifecycleController, BuildError> {
        let timer: Arc<dyn Timer> = match self.timer {
            Some(timer) => timer,
            None => Arc::new(TokioTimer::try_current().ok_or(BuildError::NoRuntime)?),
        };
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(Arc::clone(&clock))),
        };
        let store = self
            .store
            .unwrap_or_else(|| Box::new(InMemoryTaskStore::new()));

        Ok(LifecycleController::new(store, timer, clock, ids, self.config))
    }
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
