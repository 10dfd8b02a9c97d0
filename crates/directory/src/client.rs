// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory CRUD seam.
//!
//! Simple request/response operations over the remote directory API.
//! No retry or pagination logic lives behind this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user account in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub display_name: String,
    pub user_principal_name: String,
    pub mail: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub account_enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for user creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub display_name: String,
    pub user_principal_name: String,
    pub password: String,
    pub force_change_password: bool,
}

/// A security or mail group in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryGroup {
    pub id: String,
    pub display_name: String,
    pub description: Option<String>,
    pub mail: Option<String>,
    pub member_count: u32,
}

/// Errors from directory operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("not signed in")]
    AuthRequired,
    #[error("directory request failed: {0}")]
    Request(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Client for user/group CRUD against the remote directory.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn get_users(&self, search: Option<&str>) -> Result<Vec<UserAccount>, DirectoryError>;
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, DirectoryError>;
    async fn reset_password(
        &self,
        user_id: &str,
        new_password: &str,
        force_change: bool,
    ) -> Result<(), DirectoryError>;
    async fn set_account_enabled(&self, user_id: &str, enabled: bool)
        -> Result<(), DirectoryError>;
    async fn get_groups(&self, search: Option<&str>)
        -> Result<Vec<DirectoryGroup>, DirectoryError>;
    async fn add_group_member(&self, group_id: &str, user_id: &str)
        -> Result<(), DirectoryError>;
    async fn remove_group_member(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<(), DirectoryError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory directory for testing
    #[derive(Clone, Default)]
    pub struct FakeDirectoryClient {
        users: Arc<Mutex<Vec<UserAccount>>>,
        groups: Arc<Mutex<Vec<DirectoryGroup>>>,
        members: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl FakeDirectoryClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_group(self, group: DirectoryGroup) -> Self {
            self.groups.lock().push(group);
            self
        }

        pub fn members_of(&self, group_id: &str) -> Vec<String> {
            self.members
                .lock()
                .iter()
                .filter(|(g, _)| g == group_id)
                .map(|(_, u)| u.clone())
                .collect()
        }
    }

    #[async_trait]
    impl DirectoryClient for FakeDirectoryClient {
        async fn get_users(
            &self,
            search: Option<&str>,
        ) -> Result<Vec<UserAccount>, DirectoryError> {
            let users = self.users.lock();
            Ok(match search {
                Some(q) => {
                    let q = q.to_lowercase();
                    users
                        .iter()
                        .filter(|u| {
                            u.display_name.to_lowercase().contains(&q)
                                || u.user_principal_name.to_lowercase().contains(&q)
                        })
                        .cloned()
                        .collect()
                }
                None => users.clone(),
            })
        }

        async fn create_user(&self, user: NewUser) -> Result<UserAccount, DirectoryError> {
            let mut users = self.users.lock();
            let account = UserAccount {
                id: format!("user-{}", users.len() + 1),
                display_name: user.display_name,
                user_principal_name: user.user_principal_name,
                mail: None,
                job_title: None,
                department: None,
                account_enabled: true,
                created_at: Some(Utc::now()),
            };
            users.push(account.clone());
            Ok(account)
        }

        async fn reset_password(
            &self,
            user_id: &str,
            _new_password: &str,
            _force_change: bool,
        ) -> Result<(), DirectoryError> {
            self.require_user(user_id)
        }

        async fn set_account_enabled(
            &self,
            user_id: &str,
            enabled: bool,
        ) -> Result<(), DirectoryError> {
            let mut users = self.users.lock();
            match users.iter_mut().find(|u| u.id == user_id) {
                Some(user) => {
                    user.account_enabled = enabled;
                    Ok(())
                }
                None => Err(DirectoryError::NotFound(user_id.to_string())),
            }
        }

        async fn get_groups(
            &self,
            _search: Option<&str>,
        ) -> Result<Vec<DirectoryGroup>, DirectoryError> {
            Ok(self.groups.lock().clone())
        }

        async fn add_group_member(
            &self,
            group_id: &str,
            user_id: &str,
        ) -> Result<(), DirectoryError> {
            self.members.lock().push((group_id.to_string(), user_id.to_string()));
            Ok(())
        }

        async fn remove_group_member(
            &self,
            group_id: &str,
            user_id: &str,
        ) -> Result<(), DirectoryError> {
            self.members.lock().retain(|(g, u)| !(g == group_id && u == user_id));
            Ok(())
        }
    }

    impl FakeDirectoryClient {
        fn require_user(&self, user_id: &str) -> Result<(), DirectoryError> {
            if self.users.lock().iter().any(|u| u.id == user_id) {
                Ok(())
            } else {
                Err(DirectoryError::NotFound(user_id.to_string()))
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDirectoryClient;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
