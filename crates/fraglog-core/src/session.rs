//! Session metadata: the game mode and map the server loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const LOADING_MARKER: &str = "Loading level ";

/// Failure to establish what was played.
///
/// Fatal only to the metadata itself: configuration, start time, and the
/// frag history all remain independently recoverable from the same log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no usable level-loading line in log")]
    InfoNotFound,
}

/// The game mode and map of the session, extracted once from the
/// level-loading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Game mode identifier, e.g. `FCMP`.
    pub mode: String,
    /// Bare map name with the `Levels/` path prefix stripped, e.g. `mp_dune`.
    pub map: String,
}

impl SessionInfo {
    /// Extract mode and map from the first level-loading line.
    ///
    /// The line reads `… Loading level Levels/<map>, mission <mode> …`; the
    /// map is the path token's final segment with its trailing comma
    /// stripped.
    pub fn parse(log: &str) -> Result<Self, SessionError> {
        let line = log
            .lines()
            .find(|line| line.contains(LOADING_MARKER))
            .ok_or(SessionError::InfoNotFound)?;

        let mut tokens = line.split_whitespace();
        let mut mode = None;
        let mut map = None;
        while let Some(token) = tokens.next() {
            match token {
                "level" => {
                    map = tokens
                        .next()
                        .and_then(|path| path.rsplit('/').next())
                        .map(|name| name.trim_end_matches(',').to_owned());
                }
                "mission" => mode = tokens.next().map(str::to_owned),
                _ => {}
            }
        }

        match (mode, map) {
            (Some(mode), Some(map)) if !mode.is_empty() && !map.is_empty() => {
                Ok(Self { mode, map })
            }
            _ => Err(SessionError::InfoNotFound),
        }
    }
}
