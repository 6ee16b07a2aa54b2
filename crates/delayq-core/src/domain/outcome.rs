//! Outcome of a cancellation request.

use serde::{Deserialize, Serialize};

use super::task::Task;

/// A unified classification of a cancel result.
///
/// - `Canceled`: the task was pending and is now canceled.
/// - `AlreadyCanceled`: the task was canceled earlier; nothing changed.
/// - `Conflict`: the task already completed; nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelOutcome {
    Canceled,
    AlreadyCanceled,
    Conflict,
}

impl CancelOutcome {
    /// Conflict is the only outcome the caller should report as a failure.
    pub fn is_success(self) -> bool {
        !matches!(self, CancelOutcome::Conflict)
    }
}

/// The task as it stands after a cancel request, plus what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelResult {
    pub task: Task,
    pub outcome: CancelOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::canceled(CancelOutcome::Canceled, true)]
    #[case::already_canceled(CancelOutcome::AlreadyCanceled, true)]
    #[case::conflict(CancelOutcome::Conflict, false)]
    fn success_classification(#[case] outcome: CancelOutcome, #[case] expected: bool) {
        assert_eq!(outcome.is_success(), expected);
    }
}
