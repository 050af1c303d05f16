//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path segments are parsed here so a malformed id never reaches a service.
//! Failures are business-rule violations carrying the offending field.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::business_rule_violation(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a numeric path id. Range checks stay with the domain guard.
pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<i64, Error> {
    value.parse::<i64>().map_err(|_| {
        invalid_value_error(
            field,
            ErrorCode::InvalidId,
            format!("{} must be an integer", field.as_str()),
            value,
        )
    })
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        invalid_value_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainCode;

    #[rstest]
    #[case("7", 7)]
    #[case("0", 0)]
    #[case("-3", -3)]
    fn parses_integer_ids(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_id(raw, FieldName::new("id")), Ok(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn rejects_non_integer_ids(#[case] raw: &str) {
        let err = parse_id(raw, FieldName::new("userId")).expect_err("not an id");
        assert_eq!(err.code(), DomainCode::BusinessRuleViolation);
        assert_eq!(err.message(), "userId must be an integer");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "userId", "value": raw, "code": "invalid_id"}))
        );
    }

    #[rstest]
    fn parses_and_rejects_uuids() {
        let uuid = Uuid::new_v4();
        assert_eq!(parse_uuid(&uuid.to_string(), FieldName::new("uuid")), Ok(uuid));

        let err = parse_uuid("nope", FieldName::new("uuid")).expect_err("not a uuid");
        assert_eq!(err.code(), DomainCode::BusinessRuleViolation);
        assert_eq!(err.message(), "uuid must be a valid UUID");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "uuid", "value": "nope", "code": "invalid_uuid"}))
        );
    }
}
