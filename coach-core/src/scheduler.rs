//! Window scheduler: greedy single-pass placement of ranked tasks.
//!
//! # Algorithm
//!
//! A cursor starts at the window start on day 0. For each task, in ranked order:
//!
//! 1. Preference adjustment.
//!    - Morning: a cursor past 12:59 jumps to the next day's window start.
//!    - Evening: a cursor before 12:00 jumps to `window end - duration`.
//! 2. Overflow. If the task would end after the current day's window end, it
//!    moves to the next day's window start (a `MovedToNextDay` notice).
//! 3. Deadline. A task that ends by its deadline is placed and the cursor moves
//!    to its end. Otherwise it is rejected (an `UnschedulableBeforeDeadline`
//!    notice) and the cursor stays where steps 1 and 2 left it.
//!
//! "Next day" is the first window that starts after the cursor, so a task
//! running past midnight never has a later task rolled back on top of it.
//!
//! No backtracking and no re-ordering: the pass visits each task exactly once.
//!
//! The evening rule ignores where the previous task ended, so it can move the
//! cursor backwards and produce overlapping placements.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::task::Task;
use crate::time::format_timestamp;
use crate::window::{Preference, WorkWindow};

/// Hour of day that separates morning from afternoon.
const NOON: u32 = 12;

/// A task assigned to `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub task: Task,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Placement {
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The task did not fit before the window end; it was moved to the
    /// next day's window start.
    MovedToNextDay,
    /// The task could not finish before its deadline and was dropped.
    UnschedulableBeforeDeadline,
}

/// A non-fatal scheduling exception for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub task_name: String,
    pub kind: NoticeKind,
    /// New start for a moved task; the end it would have had for a rejected one.
    pub at: NaiveDateTime,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NoticeKind::MovedToNextDay => write!(
                f,
                "'{}' doesn't fit today. Moving to next day ({}).",
                self.task_name,
                format_timestamp(self.at)
            ),
            NoticeKind::UnschedulableBeforeDeadline => write!(
                f,
                "'{}' cannot be scheduled before deadline.",
                self.task_name
            ),
        }
    }
}

/// Result of one scheduling pass. Possibly partial; never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub placements: Vec<Placement>,
    pub notices: Vec<Notice>,
}

impl ScheduleOutcome {
    /// Names of tasks dropped for missing their deadline, in ranked order.
    pub fn rejected(&self) -> Vec<&str> {
        self.notices_of(NoticeKind::UnschedulableBeforeDeadline)
    }

    /// Names of tasks that rolled over to a later day because of overflow.
    pub fn moved(&self) -> Vec<&str> {
        self.notices_of(NoticeKind::MovedToNextDay)
    }

    fn notices_of(&self, kind: NoticeKind) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.task_name.as_str())
            .collect()
    }
}

/// Scheduling cursor. Owned by a single `run`, threaded through each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    /// Day offset from the first window.
    day: i64,
    at: NaiveDateTime,
}

impl Cursor {
    fn start(window: &WorkWindow) -> Self {
        Self {
            day: 0,
            at: window.start(),
        }
    }

    /// Move to `at`, keeping `day` in step with the window `at` falls in.
    fn advance(self, at: NaiveDateTime, window: &WorkWindow) -> Self {
        Self {
            day: self.day.max(day_of(window, at)),
            at,
        }
    }

    fn next_day(self, window: &WorkWindow) -> Self {
        let day = self.day.max(day_of(window, self.at)) + 1;
        Self {
            day,
            at: window.day(day).start(),
        }
    }
}

/// Offset of the last window that starts at or before `at`.
fn day_of(window: &WorkWindow, at: NaiveDateTime) -> i64 {
    let days = (at - window.start()).num_days();
    if window.day(days).start() > at {
        days - 1
    } else {
        days
    }
}

#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: WorkWindow,
    preference: Preference,
}

impl WindowScheduler {
    pub fn new(window: WorkWindow, preference: Preference) -> Self {
        Self { window, preference }
    }

    /// Place `ranked` tasks in order. Exactly one pass; always terminates.
    pub fn run(&self, ranked: &[Task]) -> ScheduleOutcome {
        let mut outcome = ScheduleOutcome::default();
        let mut cursor = Cursor::start(&self.window);

        for task in ranked {
            cursor = self.place(task, cursor, &mut outcome);
        }

        info!(
            placed = outcome.placements.len(),
            moved = outcome.moved().len(),
            rejected = outcome.rejected().len(),
            preference = ?self.preference,
            "schedule pass complete"
        );
        outcome
    }

    fn place(&self, task: &Task, cursor: Cursor, outcome: &mut ScheduleOutcome) -> Cursor {
        let duration = task.duration();
        let mut cursor = self.apply_preference(cursor, duration);

        let mut end = cursor.at + duration;
        if end > self.window.day(cursor.day).end() {
            cursor = cursor.next_day(&self.window);
            end = cursor.at + duration;
            debug!(task = task.name(), start = %cursor.at, "moved to next day");
            outcome.notices.push(Notice {
                task_name: task.name().to_string(),
                kind: NoticeKind::MovedToNextDay,
                at: cursor.at,
            });
        }

        if end <= task.deadline() {
            debug!(task = task.name(), start = %cursor.at, end = %end, "placed");
            outcome.placements.push(Placement {
                task: task.clone(),
                start: cursor.at,
                end,
            });
            cursor.advance(end, &self.window)
        } else {
            warn!(
                task = task.name(),
                end = %end,
                deadline = %task.deadline(),
                "cannot be scheduled before deadline"
            );
            outcome.notices.push(Notice {
                task_name: task.name().to_string(),
                kind: NoticeKind::UnschedulableBeforeDeadline,
                at: end,
            });
            cursor
        }
    }

    fn apply_preference(&self, cursor: Cursor, duration: Duration) -> Cursor {
        match self.preference {
            Preference::Morning if cursor.at.hour() > NOON => cursor.next_day(&self.window),
            Preference::Evening if cursor.at.hour() < NOON => Cursor {
                at: self.window.day(cursor.day).end() - duration,
                ..cursor
            },
            _ => cursor,
        }
    }
}

/// Place `ranked` tasks into `window` honouring `preference`.
pub fn schedule(ranked: &[Task], window: WorkWindow, preference: Preference) -> ScheduleOutcome {
    WindowScheduler::new(window, preference).run(ranked)
}
