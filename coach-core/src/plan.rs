//! Plan: rank, then schedule. The full run in one call.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::scheduler::{schedule, ScheduleOutcome};
use crate::scoring::{rank, ranked_tasks, ScoredTask};
use crate::task::Task;
use crate::window::{Preference, WorkWindow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Reference time the scores were computed against.
    pub generated_at: NaiveDateTime,
    pub ranked: Vec<ScoredTask>,
    #[serde(flatten)]
    pub outcome: ScheduleOutcome,
}

impl Plan {
    /// True when every ranked task got a placement.
    pub fn is_complete(&self) -> bool {
        self.outcome.placements.len() == self.ranked.len()
    }

    pub fn unscheduled(&self) -> Vec<&str> {
        self.outcome.rejected()
    }
}

/// Rank `tasks` against `now` and place them into `window`.
pub fn plan(
    tasks: &[Task],
    now: NaiveDateTime,
    window: WorkWindow,
    preference: Preference,
) -> Plan {
    let ranked = rank(tasks, now);
    let outcome = schedule(&ranked_tasks(&ranked), window, preference);
    Plan {
        generated_at: now,
        ranked,
        outcome,
    }
}
