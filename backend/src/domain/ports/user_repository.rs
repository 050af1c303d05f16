//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::value::Email;
use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The unique email index rejected the write.
        DuplicateEmail { email: String } => "user email already taken: {email}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage contract for user accounts.
///
/// Each call is one unit of work; adapters never expose a partially applied
/// write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its storage-assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Persist changes to an existing user.
    async fn save(&self, user: &User) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch every user ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Whether any user already holds `email`.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserRepositoryError>;

    /// Delete a user and, transitively, everything they own.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserRepositoryError>;
}
