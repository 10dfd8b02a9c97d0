// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed ledger and action log.

use crate::ledger::{Ledger, LedgerError};
use chrono::{DateTime, Utc};
use opskit_core::{Clock, ExecutionRecord, RunStatus, SystemClock};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// One audit-trail entry from the action log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub action: String,
    pub details: Option<String>,
    pub user_account: Option<String>,
}

/// SQLite store holding the execution ledger and the action log.
///
/// The connection sits behind a mutex so concurrent runs can open and
/// close records without racing id assignment; every operation is a
/// single statement.
pub struct SqliteStore<C: Clock = SystemClock> {
    conn: Arc<Mutex<Connection>>,
    clock: C,
}

impl SqliteStore<SystemClock> {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        Self::open_with_clock(path, SystemClock)
    }
}

impl<C: Clock> SqliteStore<C> {
    pub fn open_with_clock(path: &Path, clock: C) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LedgerError::CreateParent {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let conn = Connection::open(path).map_err(|source| LedgerError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self { conn: Arc::new(Mutex::new(conn)), clock };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<(), LedgerError> {
        self.conn
            .lock()
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS execution_history (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    script_name TEXT NOT NULL,
                    parameters TEXT,
                    started_at TEXT NOT NULL,
                    completed_at TEXT,
                    status TEXT NOT NULL DEFAULT 'Running',
                    output TEXT,
                    error_output TEXT
                );

                CREATE TABLE IF NOT EXISTS action_log (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp TEXT NOT NULL,
                    category TEXT NOT NULL,
                    action TEXT NOT NULL,
                    details TEXT,
                    user_account TEXT
                );
                ",
            )
            .map_err(|source| LedgerError::Sql { source })
    }

    /// Append an audit-trail entry.
    pub fn log_action(
        &self,
        category: &str,
        action: &str,
        details: Option<&str>,
        user_account: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO action_log (timestamp, category, action, details, user_account)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![self.clock.now_utc().to_rfc3339(), category, action, details, user_account],
            )
            .map_err(|source| LedgerError::Sql { source })?;
        Ok(())
    }

    /// Most-recent-first audit-trail entries, bounded by `limit`.
    pub fn recent_actions(&self, limit: u32) -> Result<Vec<ActionEntry>, LedgerError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, timestamp, category, action, details, user_account
                 FROM action_log ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|source| LedgerError::Sql { source })?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            })
            .map_err(|source| LedgerError::Sql { source })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, timestamp, category, action, details, user_account) =
                row.map_err(|source| LedgerError::Sql { source })?;
            entries.push(ActionEntry {
                id,
                timestamp: parse_timestamp(&timestamp)?,
                category,
                action,
                details,
                user_account,
            });
        }
        Ok(entries)
    }
}

impl<C: Clock> Ledger for SqliteStore<C> {
    fn open(&self, script_name: &str, parameters: &str) -> Result<i64, LedgerError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO execution_history (script_name, parameters, started_at, status)
             VALUES (?1, ?2, ?3, 'Running')",
            params![script_name, parameters, self.clock.now_utc().to_rfc3339()],
        )
        .map_err(|source| LedgerError::Sql { source })?;
        Ok(conn.last_insert_rowid())
    }

    fn close(
        &self,
        id: i64,
        status: RunStatus,
        output: &str,
        error_output: Option<&str>,
    ) -> Result<(), LedgerError> {
        // The status guard makes close-once atomic: a nonexistent or
        // already-terminal id updates zero rows.
        let updated = self
            .conn
            .lock()
            .execute(
                "UPDATE execution_history
                 SET status = ?2, output = ?3, error_output = ?4, completed_at = ?5
                 WHERE id = ?1 AND status = 'Running'",
                params![
                    id,
                    status.to_string(),
                    output,
                    error_output,
                    self.clock.now_utc().to_rfc3339(),
                ],
            )
            .map_err(|source| LedgerError::Sql { source })?;
        if updated == 0 {
            tracing::warn!(id, %status, "close on nonexistent or already-terminal record ignored");
        }
        Ok(())
    }

    fn history(&self, limit: u32) -> Result<Vec<ExecutionRecord>, LedgerError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, script_name, parameters, started_at, completed_at,
                        status, output, error_output
                 FROM execution_history ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|source| LedgerError::Sql { source })?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, Option<String>>(7)?,
                ))
            })
            .map_err(|source| LedgerError::Sql { source })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, script_name, parameters, started_at, completed_at, status, output, error_output) =
                row.map_err(|source| LedgerError::Sql { source })?;
            records.push(ExecutionRecord {
                id,
                script_name,
                parameters: parameters.unwrap_or_default(),
                started_at: parse_timestamp(&started_at)?,
                completed_at: completed_at.as_deref().map(parse_timestamp).transpose()?,
                status: RunStatus::from_str(&status)
                    .map_err(|_| LedgerError::InvalidStatus(status.clone()))?,
                output: output.unwrap_or_default(),
                error_output,
            });
        }
        Ok(records)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, LedgerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| LedgerError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
