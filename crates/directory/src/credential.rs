// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential acquisition seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A bearer credential for the directory API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    pub secret: String,
    /// Account the token was issued to (used for audit-trail stamping)
    pub account: String,
    pub expires_at: DateTime<Utc>,
}

/// Errors from credential acquisition
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No interactive session exists; the caller must sign in first
    #[error("not signed in")]
    AuthRequired,
    #[error("credential acquisition failed: {0}")]
    Acquisition(String),
}

/// Produces a valid bearer credential on demand.
///
/// Implementations refresh silently when the cached token is close to
/// expiry; they never prompt from inside this call.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn get_valid_credential(&self) -> Result<BearerToken, CredentialError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{BearerToken, CredentialError, CredentialProvider};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake credential provider for testing
    #[derive(Clone, Default)]
    pub struct FakeCredentialProvider {
        token: Arc<Mutex<Option<BearerToken>>>,
    }

    impl FakeCredentialProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sign_in(&self, token: BearerToken) {
            *self.token.lock() = Some(token);
        }

        pub fn sign_out(&self) {
            *self.token.lock() = None;
        }
    }

    #[async_trait]
    impl CredentialProvider for FakeCredentialProvider {
        async fn get_valid_credential(&self) -> Result<BearerToken, CredentialError> {
            self.token.lock().clone().ok_or(CredentialError::AuthRequired)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCredentialProvider;

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
