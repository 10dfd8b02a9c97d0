// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The execution ledger contract.
//!
//! Append-mostly record of every run. A record is opened in `Running`
//! state before the process starts (but only after the script-existence
//! preflight), and closed exactly once with a terminal status when the
//! run ends, whether completed, failed, or cancelled; nothing vanishes
//! silently. The core depends only on this contract, not on any
//! particular storage engine.

use opskit_core::{ExecutionRecord, RunStatus};
use thiserror::Error;

/// Errors from ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger open failed at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to create ledger parent directory {path}: {source}")]
    CreateParent {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("ledger statement failed: {source}")]
    Sql {
        #[source]
        source: rusqlite::Error,
    },
    #[error("invalid status '{0}' in ledger")]
    InvalidStatus(String),
    #[error("invalid timestamp '{0}' in ledger")]
    InvalidTimestamp(String),
}

/// Durable record of run lifecycle, queryable as history.
///
/// Implementations must tolerate concurrent `open`/`close` calls from
/// independent runs: id assignment must not race, and each operation is
/// a single atomic write.
pub trait Ledger {
    /// Create a new record in `Running` state, stamped with the current
    /// time. Returns the record id (monotonically assigned).
    fn open(&self, script_name: &str, parameters: &str) -> Result<i64, LedgerError>;

    /// Transition exactly one record to a terminal state, stamping the
    /// completion time.
    ///
    /// Closing an id that is nonexistent or already terminal is a
    /// caller bug; implementations of this contract log a warning and
    /// no-op rather than corrupt the other record paths.
    fn close(
        &self,
        id: i64,
        status: RunStatus,
        output: &str,
        error_output: Option<&str>,
    ) -> Result<(), LedgerError>;

    /// Most-recent-first history, bounded by `limit`.
    fn history(&self, limit: u32) -> Result<Vec<ExecutionRecord>, LedgerError>;
}
