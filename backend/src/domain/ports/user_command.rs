//! Driving port for account lifecycle mutations.
//!
//! Arguments arrive exactly as the caller sent them, including absent values;
//! implementations own every validation step.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for creating, changing, and deleting accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a new account.
    async fn create_user(
        &self,
        email: Option<String>,
        raw_password: Option<String>,
    ) -> Result<User, Error>;

    /// Replace the account email.
    async fn change_email(&self, id: Option<i64>, new_email: Option<String>)
    -> Result<User, Error>;

    /// Replace the account password.
    async fn change_password(
        &self,
        id: Option<i64>,
        new_raw_password: Option<String>,
    ) -> Result<User, Error>;

    /// Delete the account and everything it owns.
    async fn delete_user(&self, id: Option<i64>) -> Result<(), Error>;
}
