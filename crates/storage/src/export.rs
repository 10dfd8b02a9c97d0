// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flat-text export of execution history.
//!
//! Pure formatting: records in, CSV out. Fields containing the
//! delimiter, quotes, or newlines are quoted with doubled inner quotes
//! (RFC 4180), so the artifact loads cleanly in spreadsheet tools.

use opskit_core::ExecutionRecord;
use std::borrow::Cow;
use std::io::Write;

const HEADER: &str = "Id,ScriptName,Parameters,StartedAt,CompletedAt,Status";

/// Write `records` as CSV to `out`.
pub fn write_csv<W: Write>(records: &[ExecutionRecord], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for record in records {
        let completed = record
            .completed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{}",
            record.id,
            csv_field(&record.script_name),
            csv_field(&record.parameters),
            record.started_at.to_rfc3339(),
            completed,
            record.status,
        )?;
    }
    Ok(())
}

/// Quote a field when it contains the delimiter, a quote, or a line
/// break; inner quotes are doubled.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
