//! Question-and-answer session: collect preferences and tasks from a terminal.

use anyhow::{bail, Context, Result};
use coach_core::{parse_timestamp, Preference, Task, WorkWindow};
use std::io::{BufRead, Write};

/// Everything the prompts collected.
#[derive(Debug)]
pub struct Session {
    pub preference: Preference,
    pub window: WorkWindow,
    pub tasks: Vec<Task>,
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush().ok();
        let mut s = String::new();
        let n = self.input.read_line(&mut s)?;
        if n == 0 {
            bail!("input closed while waiting for: {label}");
        }
        Ok(s.trim().to_string())
    }

    fn yes(&mut self, label: &str) -> Result<bool> {
        Ok(self.ask(label)?.eq_ignore_ascii_case("yes"))
    }
}

pub fn run_interactive<R: BufRead, W: Write>(input: R, output: W) -> Result<Session> {
    let mut p = Prompter { input, output };
    writeln!(p.output, "Welcome to the time management coach!")?;

    let preference = Preference::from_morning_person(p.yes("Are you a morning person? (yes/no)")?);
    let start = parse_timestamp(&p.ask("Enter work start time (e.g., 2025-03-25 09:00)")?)
        .context("work start")?;
    let end = parse_timestamp(&p.ask("Enter work end time (e.g., 2025-03-25 17:00)")?)
        .context("work end")?;
    let window = WorkWindow::new(start, end)?;

    let mut tasks = Vec::new();
    while p.yes("Add a task? (yes/no)")? {
        let name = p.ask("Task name")?;
        let deadline = p.ask("Deadline (e.g., 2025-03-30 17:00)")?;
        let hours = p.ask("Estimated time (hours, e.g., 2.5)")?;
        let priority = p.ask("Priority (1-5, 5 being highest)")?;

        match Task::parse(&name, &deadline, &hours, &priority) {
            Ok(task) => tasks.push(task),
            Err(e) => writeln!(p.output, "Skipping task: {e}")?,
        }
    }

    Ok(Session {
        preference,
        window,
        tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> (Result<Session>, String) {
        let mut out = Vec::new();
        let res = run_interactive(script.as_bytes(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_collects_preferences_and_tasks() {
        let script = "no\n2025-03-25 09:00\n2025-03-25 17:00\n\
                      yes\nReport\n2025-03-30 17:00\n2.5\n4\n\
                      YES\nEmail\n2025-03-26 12:00\n0.5\n2\n\
                      no\n";
        let (res, out) = run(script);
        let session = res.unwrap();

        assert_eq!(session.preference, Preference::Evening);
        assert_eq!(session.tasks.len(), 2);
        assert_eq!(session.tasks[1].name(), "Email");
        assert!(out.contains("Are you a morning person? (yes/no): "));
    }

    #[test]
    fn test_invalid_task_is_skipped() {
        let script = "yes\n2025-03-25 09:00\n2025-03-25 17:00\n\
                      yes\nBad\n2025-03-30 17:00\n-1\n4\n\
                      no\n";
        let (res, out) = run(script);

        assert!(res.unwrap().tasks.is_empty());
        assert!(out.contains("Skipping task: estimated duration must be a positive number"));
    }

    #[test]
    fn test_bad_window_is_an_error() {
        let (res, _) = run("yes\n2025-03-25 17:00\n2025-03-25 09:00\n");
        assert!(res.is_err());

        let (res, _) = run("yes\nnine\n");
        assert!(format!("{:#}", res.unwrap_err()).contains("work start"));
    }

    #[test]
    fn test_closed_input_stops_session() {
        let (res, _) = run("yes\n2025-03-25 09:00\n");
        assert!(res.is_err());
    }
}
