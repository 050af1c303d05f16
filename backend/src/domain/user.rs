//! User account entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::value::{Email, PasswordHash};

/// Storage-assigned user identifier.
///
/// ## Invariants
/// - The wrapped value is at least 1.
///
/// # Examples
/// ```
/// use notevault::domain::UserId;
///
/// assert_eq!(UserId::new(7).expect("positive id").get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(raw: i64) -> Result<Self, Error> {
        if raw < 1 {
            return Err(Error::business_rule_violation("ID is less than 1"));
        }
        Ok(Self(raw))
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated fields for a user that storage has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

/// Application user.
///
/// ## Invariants
/// - `email` and `password_hash` always hold validated values; they only
///   change through [`User::change_email`] and [`User::change_password`].
/// - The password hash is redacted from `Debug` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from its storage-assigned id and validated fields.
    pub fn new(id: UserId, draft: NewUser) -> Self {
        let NewUser {
            email,
            password_hash,
            created_at,
        } = draft;
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique account email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the account email with a freshly validated value.
    pub fn change_email(&mut self, email: Email) {
        self.email = email;
    }

    /// Replace the password hash with a freshly validated value.
    pub fn change_password(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }
}

#[cfg(test)]
mod tests;
