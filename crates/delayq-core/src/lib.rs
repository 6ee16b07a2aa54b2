//! delayq-core
//!
//! Core building blocks for the delayq scheduler: a message plus a delay
//! becomes a task that is pending until its timer fires (completed) or it is
//! canceled.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, task, view, outcome, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, Timer, TaskStore）
//! - **impls**: 実装（InMemoryTaskStore, TokioTimer, ManualTimer）
//! - **app**: アプリケーションロジック（ControllerBuilder, LifecycleController）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{BuildError, ControllerBuilder, LifecycleController, SchedulerConfig, TaskCounts};
pub use domain::{CancelOutcome, CancelResult, SchedulerError, Task, TaskId, TaskStatus, TaskView};
