//! Implementation of the `fraglog export` command.
//!
//! Writes the frag history as delimited rows: two fields for a suicide,
//! four for a kill. The varying arity is the format; rows are never padded.
//! Timestamps are RFC 3339 so the export reads back field-for-field equal.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::DateTime;
use fraglog_core::{FragEvent, FragKind, SessionReport};

use super::util::read_log;

pub fn run(log_path: &Path, out_path: &Path) -> Result<()> {
    let log = read_log(log_path)?;
    let report = SessionReport::from_log(&log)
        .context("could not establish the engine start time")?;

    write_frags(out_path, &report.frags)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    if !report.anomalies.is_empty() {
        tracing::warn!(
            count = report.anomalies.len(),
            "skipped malformed elimination lines; run `report` for details"
        );
    }
    println!("{} frags -> {}", report.frags.len(), out_path.display());

    Ok(())
}

/// Write one row per frag.
pub fn write_frags(path: &Path, frags: &[FragEvent]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for frag in frags {
        let timestamp = frag.timestamp.to_rfc3339();
        match &frag.kind {
            FragKind::Suicide => {
                writer.write_record([timestamp.as_str(), frag.killer.as_str()])?;
            }
            FragKind::Kill { victim, weapon } => {
                writer.write_record([
                    timestamp.as_str(),
                    frag.killer.as_str(),
                    victim.as_str(),
                    weapon.as_str(),
                ])?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read an export back into frag values; the inverse of [`write_frags`].
pub fn read_frags(path: &Path) -> Result<Vec<FragEvent>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut frags = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        let timestamp = DateTime::parse_from_rfc3339(field(&record, 0, row)?)
            .with_context(|| format!("row {row}: bad timestamp"))?;
        let killer = field(&record, 1, row)?.to_owned();
        let kind = match record.len() {
            2 => FragKind::Suicide,
            4 => FragKind::Kill {
                victim: field(&record, 2, row)?.to_owned(),
                weapon: field(&record, 3, row)?.to_owned(),
            },
            n => bail!("row {row}: unexpected field count {n}"),
        };
        frags.push(FragEvent {
            timestamp,
            killer,
            kind,
        });
    }

    Ok(frags)
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, row: usize) -> Result<&'r str> {
    record
        .get(index)
        .with_context(|| format!("row {row}: missing field {index}"))
}
