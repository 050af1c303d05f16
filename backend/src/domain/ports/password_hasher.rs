//! Port for the password hashing collaborator.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The hashing backend failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// One-way password encoder.
///
/// The returned string is validated by the caller as a
/// [`PasswordHash`](crate::domain::value::PasswordHash), so a misbehaving
/// adapter surfaces as a validation failure rather than a stored bad hash.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password.
    async fn encode(&self, raw_password: &str) -> Result<String, PasswordHasherError>;
}

/// Fixture hasher returning a constant, well-formed hash.
///
/// Useful for tests that exercise account workflows without paying for a
/// real key-derivation function.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl FixturePasswordHasher {
    /// Hash returned for every input.
    pub const HASH: &'static str = "$2b$04$fixturefixturefixturefuFIXTUREFIXTUREFIXTUREFIXTUREFI";
}

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn encode(&self, _raw_password: &str) -> Result<String, PasswordHasherError> {
        Ok(Self::HASH.to_owned())
    }
}
