//! Self-validating, immutable domain value types.
//!
//! Every piece of untrusted input that reaches an entity is wrapped in a
//! [`Validated`] value. The wrapper is generic over a [`ValueRule`]: the rule
//! names the payload type, the type name used in messages, whether the
//! payload is sensitive, and the type-specific check. Construction performs
//! the shared null check first and then the rule's check, so an instance only
//! exists if both succeeded.
//!
//! ```
//! use notevault::domain::value::{Email, EncryptedTitle};
//!
//! let email = Email::new("user@example.com").expect("valid email");
//! assert_eq!(email.value(), "user@example.com");
//!
//! let err = EncryptedTitle::new(Vec::new()).expect_err("empty blob");
//! assert_eq!(err.to_string(), "EncryptedTitle data is <empty>");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde_json::json;
use thiserror::Error;

use crate::domain::Error;

mod codec;
mod rules;

pub use codec::StorageCodec;
pub use rules::{
    ENCRYPTED_CONTENT_MAX_SIZE, ENCRYPTED_TITLE_MAX_SIZE, EMAIL_MAX_LENGTH, Email, EmailRule,
    EncryptedContent, EncryptedContentRule, EncryptedTitle, EncryptedTitleRule,
    PASSWORD_HASH_LENGTH, PASSWORD_HASH_PREFIXES, PLAIN_CONTENT_MAX_LENGTH,
    PLAIN_TITLE_MAX_LENGTH, PasswordHash, PasswordHashRule, PlainContent, PlainContentRule,
    PlainTitle, PlainTitleRule,
};

/// Validation failures raised while constructing a [`Validated`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueValidationError {
    /// No payload was supplied.
    #[error("{type_name} value is <null>")]
    Null { type_name: &'static str },
    /// A textual payload was empty or whitespace only.
    #[error("{type_name} value is <blank>")]
    Blank { type_name: &'static str },
    /// A textual payload exceeded its maximum character count.
    #[error("{type_name} value cannot be longer than {max} (actual length={actual})")]
    TooLong {
        type_name: &'static str,
        max: usize,
        actual: usize,
    },
    /// The email did not match the accepted address grammar.
    #[error("Invalid email format")]
    InvalidEmailFormat,
    /// The hash did not have the expected length or algorithm tag.
    #[error("{type_name} value must be a valid BCrypt hash")]
    InvalidHashFormat { type_name: &'static str },
    /// A binary payload had zero length.
    #[error("{type_name} data is <empty>")]
    Empty { type_name: &'static str },
    /// A binary payload exceeded its maximum byte size.
    #[error("{type_name} value cannot be larger than {max} (actual size={actual})")]
    TooLarge {
        type_name: &'static str,
        max: usize,
        actual: usize,
    },
}

impl ValueValidationError {
    /// Stable machine-readable reason for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Null { .. } => "null",
            Self::Blank { .. } => "blank",
            Self::TooLong { .. } => "too_long",
            Self::InvalidEmailFormat | Self::InvalidHashFormat { .. } => "invalid_format",
            Self::Empty { .. } => "empty",
            Self::TooLarge { .. } => "too_large",
        }
    }
}

impl From<ValueValidationError> for Error {
    fn from(err: ValueValidationError) -> Self {
        let code = err.code();
        Self::domain_validation(err.to_string()).with_details(json!({ "code": code }))
    }
}

/// Validation strategy for one concrete domain value type.
pub trait ValueRule {
    /// Wrapped payload, either text or bytes.
    type Payload: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Type name used in validation messages and debug output.
    const NAME: &'static str;

    /// Sensitive payloads are redacted from every textual representation.
    const SENSITIVE: bool = false;

    /// Type-specific check run after the shared null check.
    fn check(payload: &Self::Payload) -> Result<(), ValueValidationError>;
}

/// Immutable payload that satisfied its [`ValueRule`] at construction time.
///
/// Equality and hashing are defined over the payload only.
pub struct Validated<R: ValueRule> {
    value: R::Payload,
    _rule: PhantomData<fn() -> R>,
}

impl<R: ValueRule> Validated<R> {
    /// Validate and wrap a present payload.
    pub fn new(raw: impl Into<R::Payload>) -> Result<Self, ValueValidationError> {
        Self::from_nullable(Some(raw.into()))
    }

    /// Validate and wrap a payload that may be absent.
    ///
    /// An absent payload fails with `"<Type> value is <null>"`.
    pub fn from_nullable(raw: Option<R::Payload>) -> Result<Self, ValueValidationError> {
        let value = raw.ok_or(ValueValidationError::Null { type_name: R::NAME })?;
        R::check(&value)?;
        Ok(Self {
            value,
            _rule: PhantomData,
        })
    }

    /// Borrow the wrapped payload.
    pub fn value(&self) -> &R::Payload {
        &self.value
    }
}

impl<R: ValueRule> Clone for Validated<R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _rule: PhantomData,
        }
    }
}

impl<R: ValueRule> PartialEq for Validated<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<R: ValueRule> Eq for Validated<R> {}

impl<R: ValueRule> Hash for Validated<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<R: ValueRule> fmt::Debug for Validated<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(R::NAME);
        if R::SENSITIVE {
            out.field("value", &format_args!("***"));
        } else {
            out.field("value", &self.value);
        }
        out.finish()
    }
}

impl<R: ValueRule<Payload = String>> fmt::Display for Validated<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if R::SENSITIVE {
            f.write_str("***")
        } else {
            f.write_str(&self.value)
        }
    }
}

impl<R: ValueRule<Payload = String>> AsRef<str> for Validated<R> {
    fn as_ref(&self) -> &str {
        self.value.as_str()
    }
}

impl<R: ValueRule<Payload = Vec<u8>>> AsRef<[u8]> for Validated<R> {
    fn as_ref(&self) -> &[u8] {
        self.value.as_slice()
    }
}
