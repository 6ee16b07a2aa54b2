//! Domain model (ids, status, task record, external view, outcomes, errors).

pub mod errors;
pub mod ids;
pub mod outcome;
pub mod state;
pub mod task;
pub mod view;

pub use self::errors::SchedulerError;
pub use self::ids::{ParseIdError, TaskId};
pub use self::outcome::{CancelOutcome, CancelResult};
pub use self::state::TaskStatus;
pub use self::task::Task;
pub use self::view::TaskView;
