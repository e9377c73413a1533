//! Frag event extraction: one ordered pass over the log lines.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{self, RolloverCursor};

const KILLED_MARKER: &str = " killed ";
const TAG_MARKER: &str = "<Lua>";
const SELF_KILL_MARKER: &str = "itself";
const WEAPON_MARKER: &str = " with ";
const STATISTICS_MARKER: &str = "== Statistics";

/// One elimination recorded in the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragEvent {
    /// Absolute timestamp reconstructed from the relative `MM:SS` stamp.
    pub timestamp: DateTime<FixedOffset>,
    pub killer: String,
    #[serde(flatten)]
    pub kind: FragKind,
}

/// The two shapes an elimination can take.
///
/// Downstream rendering and export branch on the shape, so this is a tagged
/// variant rather than optional victim/weapon fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FragKind {
    /// The killer eliminated themself (`killed itself`, or their own name
    /// in the victim slot).
    Suicide,
    /// The killer eliminated a distinct victim with the named weapon.
    Kill { victim: String, weapon: String },
}

/// Why a single elimination line could not be parsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragLineError {
    #[error("relative time token is missing or unparseable")]
    BadTimeToken,
    #[error("no <Lua> tag between time token and killer name")]
    MissingTag,
    #[error("killer name is empty")]
    EmptyKiller,
    #[error("no weapon separator in the victim part")]
    MissingWeapon,
    #[error("victim name is empty")]
    EmptyVictim,
}

/// A skipped elimination line, surfaced to the caller instead of silently
/// dropped. Server logs routinely contain truncated lines near connection
/// drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    /// 1-based line number in the source log.
    pub line_number: usize,
    pub line: String,
    pub reason: FragLineError,
}

/// Outcome of the ordered scan: the frag history in source order, the
/// end-of-session stamp if a statistics line was seen, and every skipped
/// line.
#[derive(Debug, Clone, Default)]
pub struct FragScan {
    pub frags: Vec<FragEvent>,
    pub match_end: Option<DateTime<FixedOffset>>,
    pub anomalies: Vec<Anomaly>,
}

/// Scan the log for elimination and statistics lines, in file order.
///
/// A single [`RolloverCursor`] is threaded across all of them so hour
/// rollover stays consistent between the frag history and the match-end
/// stamp. Malformed elimination lines are skipped and collected; the scan
/// never aborts.
#[must_use]
pub fn scan(log: &str, engine_start: DateTime<FixedOffset>) -> FragScan {
    let mut cursor = RolloverCursor::new(engine_start);
    let mut frags = Vec::new();
    let mut anomalies = Vec::new();
    let mut match_end = None;

    for (index, line) in log.lines().enumerate() {
        let line = line.trim();
        if line.contains(STATISTICS_MARKER) {
            match statistics_stamp(line, &mut cursor) {
                Some(stamp) => match_end = Some(stamp),
                None => {
                    tracing::warn!(line = index + 1, "statistics line has no usable time token");
                }
            }
            continue;
        }

        let Some((prefix, suffix)) = line.split_once(KILLED_MARKER) else {
            continue;
        };
        match parse_frag(prefix, suffix, &mut cursor) {
            Ok(frag) => frags.push(frag),
            Err(reason) => {
                tracing::warn!(line = index + 1, %reason, "skipping malformed elimination line");
                anomalies.push(Anomaly {
                    line_number: index + 1,
                    line: line.to_owned(),
                    reason,
                });
            }
        }
    }

    FragScan {
        frags,
        match_end,
        anomalies,
    }
}

fn statistics_stamp(
    line: &str,
    cursor: &mut RolloverCursor,
) -> Option<DateTime<FixedOffset>> {
    let token = line.split_whitespace().next()?;
    let (minute, second) = clock::parse_relative_stamp(token)?;
    Some(cursor.resolve(minute, second))
}

fn parse_frag(
    prefix: &str,
    suffix: &str,
    cursor: &mut RolloverCursor,
) -> Result<FragEvent, FragLineError> {
    let prefix = prefix.trim();
    let (token, rest) = prefix.split_once(' ').ok_or(FragLineError::BadTimeToken)?;
    let (minute, second) =
        clock::parse_relative_stamp(token).ok_or(FragLineError::BadTimeToken)?;
    let killer = rest
        .trim_start()
        .strip_prefix(TAG_MARKER)
        .ok_or(FragLineError::MissingTag)?
        .trim();
    if killer.is_empty() {
        return Err(FragLineError::EmptyKiller);
    }

    let suffix = suffix.trim();
    let kind = if suffix == SELF_KILL_MARKER || suffix == killer {
        FragKind::Suicide
    } else {
        // Weapon codes never contain spaces, so the last separator is the
        // real one even when the victim name embeds " with ".
        let (victim, weapon) = suffix
            .rsplit_once(WEAPON_MARKER)
            .ok_or(FragLineError::MissingWeapon)?;
        let victim = victim.trim();
        let weapon = weapon.trim();
        if victim.is_empty() {
            return Err(FragLineError::EmptyVictim);
        }
        if weapon.is_empty() {
            return Err(FragLineError::MissingWeapon);
        }
        if victim == killer {
            FragKind::Suicide
        } else {
            FragKind::Kill {
                victim: victim.to_owned(),
                weapon: weapon.to_owned(),
            }
        }
    };

    // Resolve only after full validation: a skipped line must not advance
    // the shared cursor.
    Ok(FragEvent {
        timestamp: cursor.resolve(minute, second),
        killer: killer.to_owned(),
        kind,
    })
}
