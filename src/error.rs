//! Error types for the countdown engine and its field input

use thiserror::Error;

use crate::input::TimeField;

/// Rejections produced while validating H/M/S field text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} field accepts at most two digits, got {text:?}")]
    TooLong { field: TimeField, text: String },

    #[error("{field} field is not a number: {text:?}")]
    NotANumber { field: TimeField, text: String },

    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange { field: TimeField, value: u64, max: u64 },

    #[error("unknown time field: {0:?}")]
    UnknownField(String),
}

/// Failures surfaced by the timer engine
#[derive(Error, Debug)]
pub enum TimerError {
    /// A thread panicked while holding the engine lock
    #[error("timer state lock poisoned")]
    StatePoisoned,

    /// Duration edits are refused while the countdown runs
    #[error("duration fields are locked while the countdown is running")]
    FieldsLocked,
}
