//! Work window and time-of-day preference.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::InvalidWindow;

/// The caller's working interval `[start, end)` on the first scheduling day.
///
/// Later days reuse the same wall-clock bounds, see [`WorkWindow::day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl WorkWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InvalidWindow> {
        if end <= start {
            return Err(InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// The window shifted forward by `offset` whole days.
    pub fn day(&self, offset: i64) -> Self {
        let shift = Duration::days(offset);
        Self {
            start: self.start + shift,
            end: self.end + shift,
        }
    }
}

/// Coarse time-of-day preference; exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Work before noon; anything that would start in the afternoon waits
    /// for the next morning.
    Morning,
    /// Work late; morning slots are pushed to the end of the window.
    Evening,
}

impl Preference {
    pub fn from_morning_person(morning_person: bool) -> Self {
        if morning_person {
            Preference::Morning
        } else {
            Preference::Evening
        }
    }
}
