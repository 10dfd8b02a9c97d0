// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `opskit history` / `opskit export` / `opskit log` — inspect recorded
//! runs and the audit trail.

use anyhow::{Context, Result};
use opskit_storage::{export, Ledger};
use std::path::Path;

pub fn handle(limit: u32) -> Result<()> {
    let store = super::open_store()?;
    let records = store.history(limit)?;
    if records.is_empty() {
        eprintln!("No execution history");
        return Ok(());
    }

    println!(
        "{:<6} {:<24} {:<10} {:<26} {:<26}",
        "ID", "SCRIPT", "STATUS", "STARTED", "COMPLETED"
    );
    for record in &records {
        println!(
            "{:<6} {:<24} {:<10} {:<26} {:<26}",
            record.id,
            record.script_name,
            record.status.to_string(),
            record.started_at.to_rfc3339(),
            record
                .completed_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        );
    }
    Ok(())
}

pub fn handle_export(path: &Path, limit: Option<u32>) -> Result<()> {
    let store = super::open_store()?;
    let records = store.history(limit.unwrap_or(u32::MAX))?;

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    export::write_csv(&records, &mut file)?;

    println!("Exported {} record(s) to {}", records.len(), path.display());
    Ok(())
}

pub fn handle_log(limit: u32) -> Result<()> {
    let store = super::open_store()?;
    let entries = store.recent_actions(limit)?;
    if entries.is_empty() {
        eprintln!("No logged actions");
        return Ok(());
    }

    for entry in &entries {
        let details = entry.details.as_deref().unwrap_or("");
        let account = entry.user_account.as_deref().unwrap_or("-");
        println!(
            "[{}] [{}] {} {} ({})",
            entry.timestamp.to_rfc3339(),
            entry.category,
            entry.action,
            details,
            account,
        );
    }
    Ok(())
}
