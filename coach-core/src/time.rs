//! Time utilities: minute-resolution local timestamps and the wall clock.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::InvalidTask;

/// Timestamp format accepted for deadlines and window bounds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a timestamp like "2025-03-30 17:00".
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, InvalidTask> {
    NaiveDateTime::parse_from_str(input.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        InvalidTask::UnparsableTimestamp {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Combine a date with an "HH:MM" time of day.
pub fn at_time_of_day(date: NaiveDate, hhmm: &str) -> Result<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(hhmm.trim(), "%H:%M")
        .map_err(|e| anyhow::anyhow!("invalid time of day '{hhmm}': {e}"))?;
    Ok(date.and_time(time))
}

/// Current wall-clock time in an IANA timezone like "America/Chicago",
/// truncated to the minute.
pub fn local_now(tz: &str) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    let local = Utc::now().with_timezone(&tz).naive_local();
    Ok(truncate_to_minute(local))
}

fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadline() {
        let ts = parse_timestamp("2025-03-30 17:00").unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2025, 3, 30)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap()
        );
        assert_eq!(format_timestamp(ts), "2025-03-30 17:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(matches!(err, InvalidTask::UnparsableTimestamp { .. }));
    }

    #[test]
    fn test_at_time_of_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();
        let ts = at_time_of_day(day, "09:30").unwrap();
        assert_eq!(format_timestamp(ts), "2025-03-25 09:30");
        assert!(at_time_of_day(day, "25:00").is_err());
    }

    #[test]
    fn test_local_now_rejects_unknown_zone() {
        assert!(local_now("Mars/Olympus_Mons").is_err());
        assert!(local_now("America/Chicago").is_ok());
    }

    #[test]
    fn test_truncate_to_minute() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 25)
            .unwrap()
            .and_hms_opt(9, 41, 37)
            .unwrap();
        assert_eq!(format_timestamp(truncate_to_minute(ts)), "2025-03-25 09:41");
        assert_eq!(truncate_to_minute(ts).second(), 0);
    }
}
