//! coach-core: urgency ranking and greedy work-window scheduling.

pub mod error;
pub mod plan;
pub mod scheduler;
pub mod scoring;
pub mod task;
pub mod time;
pub mod window;

pub use error::{InvalidTask, InvalidWindow};
pub use plan::{plan, Plan};
pub use scheduler::{schedule, Notice, NoticeKind, Placement, ScheduleOutcome, WindowScheduler};
pub use scoring::{rank, ranked_tasks, score, score_task, urgency, ScoredTask};
pub use task::{Task, TaskRecord};
pub use time::{format_timestamp, parse_timestamp};
pub use window::{Preference, WorkWindow};
