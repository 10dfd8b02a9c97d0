// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command handlers

pub mod history;
pub mod run;
pub mod scripts;

use anyhow::Result;
use opskit_storage::SqliteStore;

/// Open the ledger database under the data directory.
pub(crate) fn open_store() -> Result<SqliteStore> {
    let path = crate::env::data_dir()?.join("opskit.db");
    Ok(SqliteStore::open(&path)?)
}
