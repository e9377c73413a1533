//! Shared helpers for subcommands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a server log as text.
///
/// Old engine logs are not reliably UTF-8; undecodable bytes are replaced
/// rather than refused.
pub fn read_log(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read log file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
