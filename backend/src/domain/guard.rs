//! Request-level precondition checks shared by every workflow.
//!
//! These run before any domain value is constructed and fail with
//! [`ErrorCode::BusinessRuleViolation`](crate::domain::ErrorCode).

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::json;

use crate::domain::{Error, UserId};

/// Standard alphabet; a final unit may omit its padding, and padding that is
/// present must be canonical.
const TRANSPORT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Minimum length of a raw password before hashing.
pub const MIN_RAW_PASSWORD_LENGTH: usize = 6;

/// Validate a caller-supplied numeric id.
///
/// # Examples
/// ```
/// use notevault::domain::validate_caller_id;
///
/// assert_eq!(validate_caller_id(Some(3)).expect("valid").get(), 3);
/// assert_eq!(validate_caller_id(None).expect_err("null").message(), "ID is <null>");
/// assert_eq!(validate_caller_id(Some(0)).expect_err("zero").message(), "ID is less than 1");
/// ```
pub fn validate_caller_id(raw: Option<i64>) -> Result<UserId, Error> {
    let raw = raw.ok_or_else(|| Error::business_rule_violation("ID is <null>"))?;
    UserId::new(raw)
}

/// Decode a standard-alphabet Base64 transport payload.
///
/// This is a transport-encoding check only; domain validation of the decoded
/// bytes happens afterwards.
///
/// # Examples
/// ```
/// use notevault::domain::decode_base64;
///
/// assert_eq!(decode_base64(Some("QQ==")).expect("valid"), vec![0x41]);
/// assert_eq!(decode_base64(Some("QQ")).expect("unpadded"), vec![0x41]);
/// assert_eq!(
///     decode_base64(Some("not base64!!")).expect_err("invalid").message(),
///     "Data is not <Base64>"
/// );
/// ```
pub fn decode_base64(payload: Option<&str>) -> Result<Vec<u8>, Error> {
    let payload = payload.ok_or_else(|| Error::business_rule_violation("Data is <null>"))?;
    if payload.trim().is_empty() {
        return Err(Error::business_rule_violation("Data is <blank>"));
    }
    TRANSPORT.decode(payload).map_err(|err| {
        Error::business_rule_violation("Data is not <Base64>")
            .with_details(json!({ "reason": err.to_string() }))
    })
}

/// Enforce the minimum raw password length before hashing.
pub fn validate_raw_password(raw: Option<&str>) -> Result<&str, Error> {
    let raw = raw.ok_or_else(|| Error::business_rule_violation("Password is <null>"))?;
    if raw.chars().count() < MIN_RAW_PASSWORD_LENGTH {
        return Err(Error::business_rule_violation(format!(
            "Password must be at least {MIN_RAW_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(raw)
}
