//! Request validation for `POST /tasks`.
//!
//! The core assumes its input is valid; every check lives here.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is required")]
    MissingMessage,

    #[error("message must be a non-empty string")]
    InvalidMessage,

    #[error("delay is required")]
    MissingDelay,

    #[error("delay must be an integer number of seconds between 0 and {max}")]
    InvalidDelay { max: u32 },

    #[error("invalid request body: {0}")]
    Body(String),
}

/// Raw body; fields stay untyped so each problem gets its own message.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub delay: Option<Value>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSchedule {
    pub message: String,
    pub delay_secs: u32,
}

impl ScheduleRequest {
    pub fn validate(self, max_delay_secs: u32) -> Result<ValidSchedule, ValidationError> {
        let message = match self.message {
            None | Some(Value::Null) => return Err(ValidationError::MissingMessage),
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(_) => return Err(ValidationError::InvalidMessage),
        };

        let invalid_delay = ValidationError::InvalidDelay {
            max: max_delay_secs,
        };
        let delay_secs = match self.delay {
            None | Some(Value::Null) => return Err(ValidationError::MissingDelay),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|d| u32::try_from(d).ok())
                .filter(|d| *d <= max_delay_secs)
                .ok_or(invalid_delay)?,
            Some(_) => return Err(invalid_delay),
        };

        Ok(ValidSchedule {
            message,
            delay_secs,
        })
    }
}
