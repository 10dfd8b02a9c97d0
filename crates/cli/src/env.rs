// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Scripts catalog directory: `OPSKIT_SCRIPTS_DIR` > the packaged or
/// development `scripts/` layout next to the executable.
pub fn scripts_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OPSKIT_SCRIPTS_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    opskit_runbook::default_scripts_dir()
}

/// Resolve data directory: OPSKIT_DATA_DIR > XDG_STATE_HOME/opskit >
/// ~/.local/state/opskit
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("OPSKIT_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("opskit"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| anyhow!("cannot determine data directory; set OPSKIT_DATA_DIR"))?;
    Ok(PathBuf::from(home).join(".local/state/opskit"))
}

/// Operator account stamped on audit-trail entries.
pub fn operator_account() -> Option<String> {
    std::env::var("OPSKIT_OPERATOR")
        .or_else(|_| std::env::var("USER"))
        .ok()
        .filter(|s| !s.is_empty())
}
