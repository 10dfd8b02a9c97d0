// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! opskit-directory: collaborator seams for the directory service.
//!
//! The identity flow and the remote CRUD API are external collaborators
//! of the execution core; this crate holds only their contracts (plus
//! fakes for tests). Implementations live with whatever front end
//! embeds the engine.

pub mod client;
pub mod credential;

pub use client::{DirectoryClient, DirectoryError, DirectoryGroup, NewUser, UserAccount};
pub use credential::{BearerToken, CredentialError, CredentialProvider};

#[cfg(any(test, feature = "test-support"))]
pub use client::FakeDirectoryClient;
#[cfg(any(test, feature = "test-support"))]
pub use credential::FakeCredentialProvider;
