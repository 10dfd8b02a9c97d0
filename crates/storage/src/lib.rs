// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! opskit-storage: durable execution ledger and action log

pub mod export;
pub mod ledger;
pub mod sqlite;

pub use ledger::{Ledger, LedgerError};
pub use sqlite::{ActionEntry, SqliteStore};
