// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::str::FromStr;

#[yare::parameterized(
    running   = { RunStatus::Running,   "Running",   false },
    completed = { RunStatus::Completed, "Completed", true },
    failed    = { RunStatus::Failed,    "Failed",    true },
    cancelled = { RunStatus::Cancelled, "Cancelled", true },
)]
fn status_display_and_terminality(status: RunStatus, display: &str, terminal: bool) {
    assert_eq!(status.to_string(), display);
    assert_eq!(status.is_terminal(), terminal);
    assert_eq!(RunStatus::from_str(display).unwrap(), status);
}

#[test]
fn status_from_str_rejects_unknown() {
    let err = RunStatus::from_str("Exploded").unwrap_err();
    assert_eq!(err.to_string(), "unknown run status 'Exploded'");
}
