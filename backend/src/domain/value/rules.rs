//! Concrete value rules: account credentials, plaintext and encrypted note
//! fields.

use std::sync::OnceLock;

use regex::Regex;

use super::{Validated, ValueRule, ValueValidationError};

/// Maximum email length in characters.
pub const EMAIL_MAX_LENGTH: usize = 254;
/// Exact length of a BCrypt hash string.
pub const PASSWORD_HASH_LENGTH: usize = 60;
/// Accepted BCrypt algorithm tags.
pub const PASSWORD_HASH_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];
/// Maximum plaintext title length in characters.
pub const PLAIN_TITLE_MAX_LENGTH: usize = 64;
/// Maximum plaintext content length in characters.
pub const PLAIN_CONTENT_MAX_LENGTH: usize = 8192;
/// Maximum encrypted title size in bytes.
pub const ENCRYPTED_TITLE_MAX_SIZE: usize = 64;
/// Maximum encrypted content size in bytes.
pub const ENCRYPTED_CONTENT_MAX_SIZE: usize = 65_536;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately; each domain label is 1..=63 characters
        // and may not start or end with a hyphen.
        let pattern = concat!(
            r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn require_not_blank(type_name: &'static str, value: &str) -> Result<(), ValueValidationError> {
    if value.trim().is_empty() {
        return Err(ValueValidationError::Blank { type_name });
    }
    Ok(())
}

fn require_max_chars(
    type_name: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValueValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValueValidationError::TooLong {
            type_name,
            max,
            actual,
        });
    }
    Ok(())
}

fn require_blob_size(
    type_name: &'static str,
    value: &[u8],
    max: usize,
) -> Result<(), ValueValidationError> {
    if value.is_empty() {
        return Err(ValueValidationError::Empty { type_name });
    }
    if value.len() > max {
        return Err(ValueValidationError::TooLarge {
            type_name,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

/// Rule for account email addresses.
#[derive(Debug, Clone, Copy)]
pub struct EmailRule;

impl ValueRule for EmailRule {
    type Payload = String;
    const NAME: &'static str = "Email";

    fn check(payload: &String) -> Result<(), ValueValidationError> {
        require_not_blank(Self::NAME, payload)?;
        require_max_chars(Self::NAME, payload, EMAIL_MAX_LENGTH)?;
        if !email_regex().is_match(payload) {
            return Err(ValueValidationError::InvalidEmailFormat);
        }
        Ok(())
    }
}

/// Rule for stored password hashes.
///
/// Only the shape of the hash is checked. Raw password strength is a
/// request-level rule enforced before hashing.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHashRule;

impl ValueRule for PasswordHashRule {
    type Payload = String;
    const NAME: &'static str = "PasswordHash";
    const SENSITIVE: bool = true;

    fn check(payload: &String) -> Result<(), ValueValidationError> {
        require_not_blank(Self::NAME, payload)?;
        let well_formed = payload.len() == PASSWORD_HASH_LENGTH
            && PASSWORD_HASH_PREFIXES
                .iter()
                .any(|prefix| payload.starts_with(prefix));
        if !well_formed {
            return Err(ValueValidationError::InvalidHashFormat {
                type_name: Self::NAME,
            });
        }
        Ok(())
    }
}

/// Rule for plaintext titles.
#[derive(Debug, Clone, Copy)]
pub struct PlainTitleRule;

impl ValueRule for PlainTitleRule {
    type Payload = String;
    const NAME: &'static str = "PlainTitle";

    fn check(payload: &String) -> Result<(), ValueValidationError> {
        require_not_blank(Self::NAME, payload)?;
        require_max_chars(Self::NAME, payload, PLAIN_TITLE_MAX_LENGTH)
    }
}

/// Rule for plaintext content. Empty content is allowed.
#[derive(Debug, Clone, Copy)]
pub struct PlainContentRule;

impl ValueRule for PlainContentRule {
    type Payload = String;
    const NAME: &'static str = "PlainContent";

    fn check(payload: &String) -> Result<(), ValueValidationError> {
        require_max_chars(Self::NAME, payload, PLAIN_CONTENT_MAX_LENGTH)
    }
}

/// Rule for client-encrypted titles.
///
/// The bytes are opaque; only their size is checked.
#[derive(Debug, Clone, Copy)]
pub struct EncryptedTitleRule;

impl ValueRule for EncryptedTitleRule {
    type Payload = Vec<u8>;
    const NAME: &'static str = "EncryptedTitle";
    const SENSITIVE: bool = true;

    fn check(payload: &Vec<u8>) -> Result<(), ValueValidationError> {
        require_blob_size(Self::NAME, payload, ENCRYPTED_TITLE_MAX_SIZE)
    }
}

/// Rule for client-encrypted content.
#[derive(Debug, Clone, Copy)]
pub struct EncryptedContentRule;

impl ValueRule for EncryptedContentRule {
    type Payload = Vec<u8>;
    const NAME: &'static str = "EncryptedContent";
    const SENSITIVE: bool = true;

    fn check(payload: &Vec<u8>) -> Result<(), ValueValidationError> {
        require_blob_size(Self::NAME, payload, ENCRYPTED_CONTENT_MAX_SIZE)
    }
}

/// Account email address.
pub type Email = Validated<EmailRule>;
/// BCrypt password hash. Redacted in every textual representation.
pub type PasswordHash = Validated<PasswordHashRule>;
/// Non-blank plaintext title.
pub type PlainTitle = Validated<PlainTitleRule>;
/// Optional-length plaintext content.
pub type PlainContent = Validated<PlainContentRule>;
/// Size-bounded opaque title blob.
pub type EncryptedTitle = Validated<EncryptedTitleRule>;
/// Size-bounded opaque content blob.
pub type EncryptedContent = Validated<EncryptedContentRule>;
