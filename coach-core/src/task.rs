//! Task model: the validated, read-only input to ranking and scheduling.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::InvalidTask;
use crate::time::{format_timestamp, parse_timestamp};

/// Longest estimate accepted for a single task (one year of hours).
pub const MAX_ESTIMATED_HOURS: f64 = 24.0 * 365.0;

/// A unit of work with a deadline, an hour estimate and a 1-5 priority.
///
/// Fields are private: the only way in is through [`Task::new`] or
/// [`Task::parse`], so every `Task` in the system has a non-empty name,
/// an estimate of at least one second and a priority in `1..=5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    name: String,
    deadline: NaiveDateTime,
    estimated_hours: f64,
    priority: u8,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        deadline: NaiveDateTime,
        estimated_hours: f64,
        priority: i64,
    ) -> Result<Self, InvalidTask> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidTask::EmptyName);
        }
        if !estimated_hours.is_finite() || estimated_hours <= 0.0 {
            return Err(InvalidTask::NonPositiveDuration(estimated_hours));
        }
        if duration_seconds(estimated_hours) < 1 {
            return Err(InvalidTask::DurationTooShort(estimated_hours));
        }
        if estimated_hours > MAX_ESTIMATED_HOURS {
            return Err(InvalidTask::DurationTooLong(estimated_hours));
        }
        let priority = u8::try_from(priority)
            .ok()
            .filter(|p| (1..=5).contains(p))
            .ok_or(InvalidTask::PriorityOutOfRange(priority))?;

        Ok(Self {
            name,
            deadline,
            estimated_hours,
            priority,
        })
    }

    /// Build a task from raw text fields, e.g.
    /// `("Report", "2025-03-30 17:00", "2.5", "4")`.
    pub fn parse(
        name: &str,
        deadline: &str,
        estimated_hours: &str,
        priority: &str,
    ) -> Result<Self, InvalidTask> {
        let deadline = parse_timestamp(deadline)?;
        let hours: f64 = estimated_hours
            .trim()
            .parse()
            .map_err(|_| InvalidTask::InvalidDuration(estimated_hours.to_string()))?;
        let priority: i64 = priority
            .trim()
            .parse()
            .map_err(|_| InvalidTask::InvalidPriority(priority.to_string()))?;
        Self::new(name.trim(), deadline, hours, priority)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    /// Estimate in hours, as entered.
    pub fn estimated_hours(&self) -> f64 {
        self.estimated_hours
    }

    /// 1 (low) to 5 (high).
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Estimate as a time span, rounded to whole seconds.
    pub fn duration(&self) -> Duration {
        Duration::seconds(duration_seconds(self.estimated_hours))
    }
}

fn duration_seconds(hours: f64) -> i64 {
    (hours * 3600.0).round() as i64
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Due: {}, Time: {}h, Priority: {})",
            self.name,
            format_timestamp(self.deadline),
            self.estimated_hours,
            self.priority
        )
    }
}

/// Wire shape of a task: plain fields with a text deadline.
///
/// This is what task files contain; it becomes a [`Task`] only after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub name: String,
    /// "YYYY-MM-DD HH:MM"
    pub deadline: String,
    pub hours: f64,
    pub priority: i64,
}

impl TryFrom<TaskRecord> for Task {
    type Error = InvalidTask;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let deadline = parse_timestamp(&record.deadline)?;
        Task::new(record.name, deadline, record.hours, record.priority)
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            deadline: format_timestamp(task.deadline),
            name: task.name,
            hours: task.estimated_hours,
            priority: i64::from(task.priority),
        }
    }
}
