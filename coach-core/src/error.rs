//! Validation errors raised while building tasks and work windows.
//!
//! Scheduling itself never fails: overflow and missed deadlines are reported
//! as [`crate::scheduler::Notice`] values, not errors.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A task record that cannot be turned into a [`crate::Task`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidTask {
    #[error("task name must be non-empty")]
    EmptyName,

    #[error("estimated duration must be a positive number of hours, got {0}")]
    NonPositiveDuration(f64),

    #[error("estimated duration must be at least one second, got {0} hours")]
    DurationTooShort(f64),

    #[error("estimated duration must be at most one year, got {0} hours")]
    DurationTooLong(f64),

    #[error("estimated duration '{0}' is not a number")]
    InvalidDuration(String),

    #[error("priority must be in 1..=5, got {0}")]
    PriorityOutOfRange(i64),

    #[error("priority '{0}' is not an integer")]
    InvalidPriority(String),

    #[error("invalid timestamp '{input}' (expected YYYY-MM-DD HH:MM): {reason}")]
    UnparsableTimestamp { input: String, reason: String },
}

/// A work window whose end does not come after its start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("work window end {end} must be after start {start}")]
pub struct InvalidWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
