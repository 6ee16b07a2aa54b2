//! Errors - エラー型と分類
//!
//! Conflict（完了済みタスクのキャンセル）はエラーではなく、
//! `CancelOutcome::Conflict` として返します。

use thiserror::Error;

use super::ids::TaskId;

/// SchedulerError はコア操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
}
