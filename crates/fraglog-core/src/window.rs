//! Approximate match window: when play actually started and ended.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;
use thiserror::Error;

use crate::frag::FragScan;

const LOADED_MARKER: &str = " loaded in ";

/// The window could not be derived; all other results remain usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("no level-load duration line in log")]
    LoadDurationNotFound,
    #[error("no end-of-session statistics line in log")]
    StatisticsNotFound,
}

/// Approximate start and end of the match itself, both absolute.
///
/// Start is the engine start plus the level-loading duration; end is the
/// stamp of the final statistics line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl MatchWindow {
    /// Derive the window from the load-duration line and the statistics
    /// stamp the ordered scan already resolved.
    ///
    /// Taking the stamp from [`FragScan`] keeps the end time on the same
    /// rollover cursor as the frag history.
    pub fn resolve(
        log: &str,
        engine_start: DateTime<FixedOffset>,
        scan: &FragScan,
    ) -> Result<Self, WindowError> {
        let load_secs = log
            .lines()
            .find_map(load_duration_secs)
            .ok_or(WindowError::LoadDurationNotFound)?;
        let end = scan.match_end.ok_or(WindowError::StatisticsNotFound)?;
        Ok(Self {
            start: engine_start + Duration::seconds(load_secs),
            end,
        })
    }
}

/// Whole seconds from a `… loaded in 26.9 sec` line, fraction truncated.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the intended rounding"
)]
fn load_duration_secs(line: &str) -> Option<i64> {
    let index = line.find(LOADED_MARKER)?;
    let rest = &line[index + LOADED_MARKER.len()..];
    let seconds: f64 = rest.split_whitespace().next()?.parse().ok()?;
    Some(seconds as i64)
}
