//! Implementation of the `fraglog report` command.
//!
//! Human-readable by default: session metadata, the match window, then one
//! rendered line per frag. `--json` emits the full structured report
//! instead.

use std::io::{Write, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use fraglog_core::{SessionReport, render_frag, render_frag_lossy};

use super::util::read_log;

pub fn run(log_path: &Path, json: bool) -> Result<()> {
    let log = read_log(log_path)?;
    let report = SessionReport::from_log(&log)
        .context("could not establish the engine start time")?;

    if json {
        let stdout = stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &report)
            .context("failed to serialize report")?;
        writeln!(writer)?;
        return Ok(());
    }

    println!("Engine started {}", report.engine_start);
    match &report.session {
        Some(session) => println!("Playing {} on {}", session.mode, session.map),
        None => println!("Session metadata unavailable"),
    }
    match &report.window {
        Some(window) => println!("Match window {} .. {}", window.start, window.end),
        None => println!("Match window unavailable"),
    }

    println!();
    for frag in &report.frags {
        match render_frag(frag) {
            Ok(line) => println!("{line}"),
            Err(error) => {
                // Policy: degrade the glyph, keep the line.
                tracing::warn!(%error, "substituting fallback glyph");
                println!("{}", render_frag_lossy(frag));
            }
        }
    }

    if !report.anomalies.is_empty() {
        println!();
        println!("{} line(s) skipped as malformed:", report.anomalies.len());
        for anomaly in &report.anomalies {
            println!("  line {}: {}", anomaly.line_number, anomaly.reason);
        }
    }

    Ok(())
}
