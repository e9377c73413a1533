//! Absolute time recovery: engine start parsing and relative-stamp resolution.
//!
//! The engine logs one absolute wall-clock stamp (the header) and then only
//! relative `MM:SS` pairs per event. [`parse_start_time`] recovers the root
//! reference point; [`RolloverCursor`] rebuilds absolute timestamps from the
//! relative pairs by tracking when the relative clock wraps past `:59`.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::cvar::CvarMap;

/// Cvar holding the server's UTC offset in whole hours.
pub const TIMEZONE_CVAR: &str = "g_timezone";

const HEADER_MARKER: &str = "Log Started at ";
const HEADER_FORMAT: &str = "%A, %B %d, %Y %H:%M:%S";

/// Failures that leave the log without a trustworthy time reference.
///
/// All of these are fatal to the whole parse: no event timestamp can be
/// reconstructed without the engine start time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The first line is missing or does not carry the engine start stamp
    /// (empty file, truncated log, different engine version).
    #[error("log header is missing or malformed")]
    MalformedHeader,

    /// A required cvar is not declared anywhere in the log.
    #[error("required cvar {name} is not declared in the log")]
    MissingCvar { name: &'static str },

    /// A required cvar is declared but its value is unusable.
    #[error("cvar {name} has unusable value {value:?}")]
    InvalidCvar { name: &'static str, value: String },
}

/// Parse the engine start time from the log header, expressed in the
/// timezone the [`TIMEZONE_CVAR`] cvar declares.
pub fn parse_start_time(
    log: &str,
    cvars: &CvarMap,
) -> Result<DateTime<FixedOffset>, ClockError> {
    let header = log.lines().next().ok_or(ClockError::MalformedHeader)?;
    let index = header.find(HEADER_MARKER).ok_or(ClockError::MalformedHeader)?;
    let stamp = header[index + HEADER_MARKER.len()..].trim();
    let naive = NaiveDateTime::parse_from_str(stamp, HEADER_FORMAT)
        .map_err(|_| ClockError::MalformedHeader)?;

    let raw = cvars
        .get(TIMEZONE_CVAR)
        .ok_or(ClockError::MissingCvar { name: TIMEZONE_CVAR })?;
    let offset = raw
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(|hours| hours.checked_mul(3600))
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ClockError::InvalidCvar {
            name: TIMEZONE_CVAR,
            value: raw.to_owned(),
        })?;

    // Fixed offsets never make a local time ambiguous or skipped.
    naive
        .and_local_timezone(offset)
        .single()
        .ok_or(ClockError::MalformedHeader)
}

/// Parse a `<MM:SS>` relative time token.
///
/// Returns `None` unless both fields are in-range clock values.
pub(crate) fn parse_relative_stamp(token: &str) -> Option<(u32, u32)> {
    let inner = token.strip_prefix('<')?.strip_suffix('>')?;
    let (minute, second) = inner.split_once(':')?;
    let minute: u32 = minute.parse().ok()?;
    let second: u32 = second.parse().ok()?;
    (minute < 60 && second < 60).then_some((minute, second))
}

/// Current-hour estimate threaded through an ordered event scan.
///
/// The relative clock only ever increases within an hour, so a minute value
/// strictly below the previous one means the clock wrapped and the absolute
/// hour advanced. The anchor is a full `DateTime`, so advancing past 23h
/// rolls the date as well. Exactly one cursor must own a given scan: the
/// resolution order is the event order, and resolving out of order produces
/// wrong hours for everything after the first missed wrap.
#[derive(Debug, Clone)]
pub struct RolloverCursor {
    /// Engine start truncated to the hour, advanced on each wrap.
    hour_anchor: DateTime<FixedOffset>,
    /// Minute of the previously resolved event (engine start minute before
    /// the first event).
    last_minute: u32,
}

impl RolloverCursor {
    #[must_use]
    pub fn new(engine_start: DateTime<FixedOffset>) -> Self {
        let hour_anchor = engine_start
            .with_minute(0)
            .and_then(|dt| dt.with_second(0))
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(engine_start);
        Self {
            hour_anchor,
            last_minute: engine_start.minute(),
        }
    }

    /// Resolve one relative stamp to an absolute timestamp, consuming its
    /// position in the event order.
    ///
    /// Equal minutes never advance the hour, whatever the seconds do;
    /// repeated identical stamps resolve to identical timestamps with no
    /// artificial tie-break.
    pub fn resolve(&mut self, minute: u32, second: u32) -> DateTime<FixedOffset> {
        if minute < self.last_minute {
            self.hour_anchor += Duration::hours(1);
        }
        self.last_minute = minute;
        self.hour_anchor
            + Duration::minutes(i64::from(minute))
            + Duration::seconds(i64::from(second))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const HEADER: &str = "Log Started at Monday, June 12, 2006 14:00:00";

    fn start_at(header: &str, timezone: &str) -> Result<DateTime<FixedOffset>, ClockError> {
        let log = format!("{header}\n<00:00> Lua cvar: (g_timezone,{timezone})\n");
        parse_start_time(&log, &CvarMap::from_log(&log))
    }

    fn fixed_start(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 6, 12, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parses_header_and_applies_offset() {
        let start = start_at(HEADER, "-5").unwrap();
        assert_eq!(start.to_rfc3339(), "2006-06-12T14:00:00-05:00");
    }

    #[test]
    fn positive_offsets_work_too() {
        let start = start_at("Log Started at Friday, September 01, 2017 08:15:59", "3").unwrap();
        assert_eq!(start.to_rfc3339(), "2017-09-01T08:15:59+03:00");
    }

    #[test]
    fn empty_log_is_a_malformed_header() {
        assert_eq!(
            parse_start_time("", &CvarMap::default()),
            Err(ClockError::MalformedHeader)
        );
    }

    #[test]
    fn garbage_first_line_is_a_malformed_header() {
        assert_eq!(
            start_at("BackupNameFormat=%Y-%m-%d", "-5"),
            Err(ClockError::MalformedHeader)
        );
    }

    #[test]
    fn truncated_stamp_is_a_malformed_header() {
        assert_eq!(
            start_at("Log Started at Monday, June 12", "-5"),
            Err(ClockError::MalformedHeader)
        );
    }

    #[test]
    fn missing_timezone_cvar_is_reported_by_name() {
        let result = parse_start_time(HEADER, &CvarMap::default());
        assert_eq!(result, Err(ClockError::MissingCvar { name: "g_timezone" }));
    }

    #[test]
    fn non_numeric_timezone_is_invalid() {
        assert_eq!(
            start_at(HEADER, "east"),
            Err(ClockError::InvalidCvar {
                name: "g_timezone",
                value: "east".to_owned(),
            })
        );
    }

    #[test]
    fn out_of_range_timezone_is_invalid() {
        assert!(matches!(
            start_at(HEADER, "99"),
            Err(ClockError::InvalidCvar { .. })
        ));
    }

    #[test]
    fn relative_stamp_requires_angle_brackets_and_clock_range() {
        assert_eq!(parse_relative_stamp("<36:26>"), Some((36, 26)));
        assert_eq!(parse_relative_stamp("<00:00>"), Some((0, 0)));
        assert_eq!(parse_relative_stamp("36:26"), None);
        assert_eq!(parse_relative_stamp("<66:26>"), None);
        assert_eq!(parse_relative_stamp("<36:99>"), None);
        assert_eq!(parse_relative_stamp("<mm:ss>"), None);
        assert_eq!(parse_relative_stamp("<3626>"), None);
    }

    #[test]
    fn nondecreasing_minutes_never_advance_the_hour() {
        let mut cursor = RolloverCursor::new(fixed_start(14, 0));
        for (minute, second) in [(5, 10), (5, 40), (30, 2), (59, 59)] {
            let resolved = cursor.resolve(minute, second);
            assert_eq!(resolved.hour(), 14, "at {minute:02}:{second:02}");
        }
    }

    #[test]
    fn decreasing_minute_advances_the_hour() {
        let mut cursor = RolloverCursor::new(fixed_start(14, 0));
        cursor.resolve(59, 10);
        let wrapped = cursor.resolve(2, 2);
        assert_eq!(wrapped.to_rfc3339(), "2006-06-12T15:02:02-05:00");
    }

    #[test]
    fn equal_minutes_with_decreasing_seconds_do_not_advance() {
        let mut cursor = RolloverCursor::new(fixed_start(14, 0));
        cursor.resolve(5, 10);
        let second = cursor.resolve(5, 2);
        assert_eq!(second.to_rfc3339(), "2006-06-12T14:05:02-05:00");
    }

    #[test]
    fn repeated_stamps_resolve_identically() {
        let mut cursor = RolloverCursor::new(fixed_start(14, 0));
        let first = cursor.resolve(12, 30);
        let second = cursor.resolve(12, 30);
        assert_eq!(first, second);
    }

    #[test]
    fn engine_start_minute_seeds_the_comparison() {
        let mut cursor = RolloverCursor::new(fixed_start(14, 58));
        let resolved = cursor.resolve(2, 0);
        assert_eq!(resolved.to_rfc3339(), "2006-06-12T15:02:00-05:00");
    }

    #[test]
    fn rollover_past_midnight_rolls_the_date() {
        let mut cursor = RolloverCursor::new(fixed_start(23, 30));
        cursor.resolve(45, 0);
        let next_day = cursor.resolve(10, 0);
        assert_eq!(next_day.to_rfc3339(), "2006-06-13T00:10:00-05:00");
    }
}
