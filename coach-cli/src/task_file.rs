//! Task files: TOML with one `[[task]]` table per task.
//!
//! ```toml
//! [[task]]
//! name = "Quarterly report"
//! deadline = "2025-03-30 17:00"
//! hours = 2.5
//! priority = 4
//! ```

use anyhow::{Context, Result};
use coach_core::{Task, TaskRecord};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TaskFile {
    #[serde(default, rename = "task")]
    tasks: Vec<TaskRecord>,
}

pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let tasks = parse_tasks(&s).with_context(|| format!("parsing {}", path.display()))?;
    debug!(count = tasks.len(), path = %path.display(), "loaded tasks");
    Ok(tasks)
}

pub fn parse_tasks(s: &str) -> Result<Vec<Task>> {
    let file: TaskFile = toml::from_str(s).context("invalid task file")?;
    file.tasks
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let name = record.name.clone();
            Task::try_from(record).with_context(|| format!("task #{} ('{}')", i + 1, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tasks_in_file_order() {
        let s = r#"
[[task]]
name = "Report"
deadline = "2025-03-30 17:00"
hours = 2.5
priority = 4

[[task]]
name = "Email"
deadline = "2025-03-26 12:00"
hours = 0.5
priority = 2
"#;
        let tasks = parse_tasks(s).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name(), "Report");
        assert_eq!(tasks[1].priority(), 2);
    }

    #[test]
    fn test_empty_file_has_no_tasks() {
        assert!(parse_tasks("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_entry_names_its_position() {
        let s = r#"
[[task]]
name = "ok"
deadline = "2025-03-30 17:00"
hours = 1
priority = 3

[[task]]
name = "bad"
deadline = "2025-03-30 17:00"
hours = 1
priority = 9
"#;
        let err = parse_tasks(s).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("task #2 ('bad')"), "{msg}");
        assert!(msg.contains("priority must be in 1..=5"), "{msg}");
    }
}
