use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use coach_core::time::{at_time_of_day, local_now};
use coach_core::{parse_timestamp, plan, rank, Preference, WorkWindow};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod report;
mod task_file;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "coach", version, about = "Rank tasks by urgency and pack them into your work day")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank tasks from a task file by urgency and priority
    Rank {
        /// TOML task file ([[task]] tables)
        #[arg(long)]
        tasks: PathBuf,

        /// Reference time "YYYY-MM-DD HH:MM" (default: now in the configured timezone)
        #[arg(long)]
        now: Option<String>,
    },

    /// Rank tasks and place them into the work window
    Plan {
        #[arg(long)]
        tasks: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        #[arg(long)]
        now: Option<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer questions to enter tasks, then print the plan
    Interactive,

    /// Manage ~/.coach/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Work start "YYYY-MM-DD HH:MM" (default: configured start on --date)
    #[arg(long)]
    start: Option<String>,

    /// Work end "YYYY-MM-DD HH:MM" (default: configured end on --date)
    #[arg(long)]
    end: Option<String>,

    /// Day to plan, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Prefer mornings: afternoon slots roll to the next morning
    #[arg(long, conflicts_with = "evening")]
    morning: bool,

    /// Prefer evenings: morning slots are pushed to the end of the day
    #[arg(long)]
    evening: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Rank { tasks, now } => {
            let cfg = config::load_config()?;
            let now = resolve_now(now.as_deref(), &cfg)?;
            let tasks = task_file::load_tasks(&tasks)?;
            if tasks.is_empty() {
                println!("No tasks to prioritize.");
                return Ok(());
            }
            print!("{}", report::render_ranked(&rank(&tasks, now), true));
        }

        Command::Plan {
            tasks,
            window,
            now,
            json,
        } => {
            let cfg = config::load_config()?;
            let now = resolve_now(now.as_deref(), &cfg)?;
            let tasks = task_file::load_tasks(&tasks)?;
            let (work_window, preference) = resolve_window(&window, &cfg, now)?;

            let p = plan(&tasks, now, work_window, preference);
            if json {
                println!("{}", serde_json::to_string_pretty(&p)?);
            } else if tasks.is_empty() {
                println!("No tasks to prioritize.");
            } else {
                print!("{}", report::render_plan(&p));
            }
        }

        Command::Interactive => {
            let cfg = config::load_config()?;
            let session = interactive::run_interactive(std::io::stdin().lock(), std::io::stdout())?;
            if session.tasks.is_empty() {
                println!("No tasks to prioritize.");
                return Ok(());
            }
            let now = resolve_now(None, &cfg)?;
            let p = plan(&session.tasks, now, session.window, session.preference);
            println!();
            print!("{}", report::render_plan(&p));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for reports and JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_env("COACH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_now(flag: Option<&str>, cfg: &Config) -> Result<NaiveDateTime> {
    match flag {
        Some(s) => Ok(parse_timestamp(s).context("--now")?),
        None => local_now(&cfg.timezone),
    }
}

fn resolve_window(
    args: &WindowArgs,
    cfg: &Config,
    now: NaiveDateTime,
) -> Result<(WorkWindow, Preference)> {
    let date = args.date.unwrap_or_else(|| now.date());

    let start = match &args.start {
        Some(s) => parse_timestamp(s).context("--start")?,
        None => at_time_of_day(date, &cfg.window.start).context("config window.start")?,
    };
    let end = match &args.end {
        Some(s) => parse_timestamp(s).context("--end")?,
        None => at_time_of_day(date, &cfg.window.end).context("config window.end")?,
    };
    let window = WorkWindow::new(start, end)?;

    let preference = if args.morning {
        Preference::Morning
    } else if args.evening {
        Preference::Evening
    } else {
        Preference::from_morning_person(cfg.morning_person)
    };

    Ok((window, preference))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(start: Option<&str>, end: Option<&str>) -> WindowArgs {
        WindowArgs {
            start: start.map(String::from),
            end: end.map(String::from),
            date: None,
            morning: false,
            evening: false,
        }
    }

    fn now() -> NaiveDateTime {
        parse_timestamp("2025-03-25 07:45").unwrap()
    }

    #[test]
    fn test_window_defaults_to_config_on_today() {
        let (w, pref) = resolve_window(&args(None, None), &Config::default(), now()).unwrap();
        assert_eq!(coach_core::format_timestamp(w.start()), "2025-03-25 09:00");
        assert_eq!(coach_core::format_timestamp(w.end()), "2025-03-25 17:00");
        assert_eq!(pref, Preference::Morning);
    }

    #[test]
    fn test_flags_override_config() {
        let mut a = args(Some("2025-03-26 08:00"), Some("2025-03-26 12:00"));
        a.evening = true;
        let (w, pref) = resolve_window(&a, &Config::default(), now()).unwrap();
        assert_eq!(coach_core::format_timestamp(w.start()), "2025-03-26 08:00");
        assert_eq!(pref, Preference::Evening);
    }

    #[test]
    fn test_empty_window_is_rejected() {
        let a = args(Some("2025-03-26 12:00"), Some("2025-03-26 08:00"));
        assert!(resolve_window(&a, &Config::default(), now()).is_err());
    }

    #[test]
    fn test_cli_parses_plan_flags() {
        let cli = Cli::try_parse_from([
            "coach", "plan", "--tasks", "t.toml", "--date", "2025-03-25", "--evening", "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Plan { window, json, .. } => {
                assert!(window.evening);
                assert!(json);
                assert_eq!(window.date, NaiveDate::from_ymd_opt(2025, 3, 25));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(
            Cli::try_parse_from(["coach", "plan", "--tasks", "t", "--morning", "--evening"])
                .is_err()
        );
    }
}
