//! Log-interpretation engine for Far Cry dedicated-server session logs.
//!
//! This crate reconstructs, from one raw log text:
//! - the console-variable declarations (`cvar`)
//! - the absolute engine start time and per-event timestamps (`clock`)
//! - the game mode and map (`session`)
//! - the ordered frag history (`frag`)
//! - the approximate match window (`window`)
//! - a human-readable rendering of each frag (`render`)
//!
//! All I/O stays with the caller: the engine consumes a `&str` of log text
//! and returns plain values. [`SessionReport::from_log`] assembles the whole
//! picture; the per-module entry points remain usable on their own when a
//! caller needs one piece without the rest.

pub mod clock;
pub mod cvar;
pub mod frag;
pub mod render;
pub mod session;
pub mod window;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub use clock::{ClockError, RolloverCursor, TIMEZONE_CVAR, parse_start_time};
pub use cvar::CvarMap;
pub use frag::{Anomaly, FragEvent, FragKind, FragLineError, FragScan, scan};
pub use render::{
    RenderError, UNKNOWN_WEAPON_GLYPH, render_frag, render_frag_lossy, weapon_glyph,
};
pub use session::{SessionError, SessionInfo};
pub use window::{MatchWindow, WindowError};

/// Everything the engine recovers from one session log.
///
/// `session` and `window` degrade to `None` independently when their marker
/// lines are absent; the frag history and its anomalies always come from
/// the scan.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub engine_start: DateTime<FixedOffset>,
    pub session: Option<SessionInfo>,
    pub window: Option<MatchWindow>,
    pub frags: Vec<FragEvent>,
    pub anomalies: Vec<Anomaly>,
}

impl SessionReport {
    /// Interpret a whole session log.
    ///
    /// Fails only when the root time reference cannot be established
    /// (malformed header, missing or unusable timezone cvar); every other
    /// failure degrades the affected field instead.
    pub fn from_log(log: &str) -> Result<Self, ClockError> {
        let cvars = CvarMap::from_log(log);
        let engine_start = clock::parse_start_time(log, &cvars)?;
        let scan = frag::scan(log, engine_start);

        let session = match SessionInfo::parse(log) {
            Ok(info) => Some(info),
            Err(error) => {
                tracing::debug!(%error, "session metadata unavailable");
                None
            }
        };
        let window = match MatchWindow::resolve(log, engine_start, &scan) {
            Ok(window) => Some(window),
            Err(error) => {
                tracing::debug!(%error, "match window unavailable");
                None
            }
        };

        Ok(Self {
            engine_start,
            session,
            window,
            frags: scan.frags,
            anomalies: scan.anomalies,
        })
    }
}
