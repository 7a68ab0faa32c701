//! Urgency scorer: ranks tasks by deadline proximity and declared priority.
//!
//! ```text
//! urgency = 100                      if hours_left <= 0
//!         = max(10, 100 / hours_left) otherwise
//! score   = urgency * 0.6 + priority * 10 * 0.4
//! ```
//!
//! Scores are never stored on the task; they are recomputed per run against
//! an injected `now`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Urgency of a task whose deadline is now or already past.
pub const OVERDUE_URGENCY: f64 = 100.0;
/// Lowest urgency any task can have, however distant its deadline.
pub const URGENCY_FLOOR: f64 = 10.0;
pub const URGENCY_WEIGHT: f64 = 0.6;
pub const PRIORITY_WEIGHT: f64 = 0.4;
/// Maps priority 1..=5 onto 10..=50, comparable with urgency.
pub const PRIORITY_SCALE: f64 = 10.0;

/// A task paired with the score it earned in one ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub task: Task,
    pub urgency: f64,
    pub score: f64,
}

/// Hours until the deadline; zero or negative once it has passed.
pub fn hours_left(task: &Task, now: NaiveDateTime) -> f64 {
    (task.deadline() - now).num_seconds() as f64 / 3600.0
}

pub fn urgency(task: &Task, now: NaiveDateTime) -> f64 {
    let hours = hours_left(task, now);
    if hours <= 0.0 {
        return OVERDUE_URGENCY;
    }
    (OVERDUE_URGENCY / hours).max(URGENCY_FLOOR)
}

fn combine(urgency: f64, priority: u8) -> f64 {
    urgency * URGENCY_WEIGHT + f64::from(priority) * PRIORITY_SCALE * PRIORITY_WEIGHT
}

pub fn score(task: &Task, now: NaiveDateTime) -> f64 {
    combine(urgency(task, now), task.priority())
}

pub fn score_task(task: &Task, now: NaiveDateTime) -> ScoredTask {
    let urgency = urgency(task, now);
    ScoredTask {
        task: task.clone(),
        urgency,
        score: combine(urgency, task.priority()),
    }
}

/// Score every task and order them highest score first.
///
/// The sort is stable: tasks with equal scores keep their input order.
pub fn rank(tasks: &[Task], now: NaiveDateTime) -> Vec<ScoredTask> {
    let mut scored: Vec<ScoredTask> = tasks.iter().map(|t| score_task(t, now)).collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Drop the scores, keeping the ranked order.
pub fn ranked_tasks(scored: &[ScoredTask]) -> Vec<Task> {
    scored.iter().map(|s| s.task.clone()).collect()
}
