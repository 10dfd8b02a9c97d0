// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution records and run status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

crate::define_id! {
    /// Ephemeral correlation id for one in-flight run.
    ///
    /// Distinct from the ledger record id: the ledger assigns durable
    /// monotonic ids at `open`; this id exists so log lines from the
    /// runner can be correlated before a record exists.
    pub struct RunId("run-");
}

/// Terminal and non-terminal states of a run.
///
/// A record is created as `Running` and transitions exactly once to one
/// of the terminal states; terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

crate::simple_display! {
    RunStatus {
        Running => "Running",
        Completed => "Completed",
        Failed => "Failed",
        Cancelled => "Cancelled",
    }
}

/// Error parsing a stored status string
#[derive(Debug, Error)]
#[error("unknown run status '{0}'")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for RunStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(RunStatus::Running),
            "Completed" => Ok(RunStatus::Completed),
            "Failed" => Ok(RunStatus::Failed),
            "Cancelled" => Ok(RunStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// One durable record of a run.
///
/// Owned by the execution ledger: the ledger assigns `id` at creation
/// and is the only writer. The process runner merely supplies the
/// terminal status and captured text at close time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: i64,
    pub script_name: String,
    /// Bound parameters serialized as a flat string-keyed map; opaque
    /// to the ledger
    pub parameters: String,
    pub started_at: DateTime<Utc>,
    /// Absent while the run is still in flight
    pub completed_at: Option<DateTime<Utc>>,
    pub status: RunStatus,
    pub output: String,
    /// Absent unless stderr text was produced or the run failed
    pub error_output: Option<String>,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
