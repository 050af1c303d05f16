//! Driving port for account reads.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch one account.
    async fn get_user(&self, id: Option<i64>) -> Result<User, Error>;

    /// Fetch every account.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
