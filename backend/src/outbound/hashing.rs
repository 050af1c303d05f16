//! Bcrypt-backed `PasswordHasher` adapter.
//!
//! Hashing is CPU bound, so it runs on the blocking thread pool. The raw
//! password copy handed to that pool is wiped when dropped.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Password hasher producing `$2b$` bcrypt hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// # Examples
    /// ```
    /// use notevault::outbound::hashing::BcryptPasswordHasher;
    ///
    /// assert!(BcryptPasswordHasher::new(12).is_ok());
    /// assert!(BcryptPasswordHasher::new(3).is_err());
    /// ```
    pub fn new(cost: u32) -> Result<Self, PasswordHasherError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordHasherError::hashing(format!(
                "bcrypt cost {cost} outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}"
            )));
        }
        Ok(Self { cost })
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn encode(&self, raw_password: &str) -> Result<String, PasswordHasherError> {
        let raw_password = Zeroizing::new(raw_password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(raw_password.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("hashing task failed: {err}")))?
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::value::PasswordHash;

    #[rstest]
    #[case(MIN_BCRYPT_COST - 1)]
    #[case(MAX_BCRYPT_COST + 1)]
    fn rejects_out_of_range_cost(#[case] cost: u32) {
        let err = BcryptPasswordHasher::new(cost).expect_err("invalid cost");
        assert!(err.to_string().contains("outside"));
    }

    #[rstest]
    #[tokio::test]
    async fn produces_verifiable_bcrypt_hash() {
        let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("valid cost");
        let hash = hasher.encode("correct horse").await.expect("hashed");

        assert!(PasswordHash::new(hash.clone()).is_ok());
        assert!(hash.starts_with("$2b$04$"));
        assert!(bcrypt::verify("correct horse", &hash).expect("verify"));
        assert!(!bcrypt::verify("wrong horse", &hash).expect("verify"));
    }
}
