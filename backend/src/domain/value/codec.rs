//! Mapping between value types and their raw storage columns.

use super::{Validated, ValueRule, ValueValidationError};

/// Bidirectional mapping between a value type and its stored column.
///
/// Absent values map to absent columns in both directions. Reading a present
/// column re-runs validation, so corrupt rows never produce a value.
///
/// # Examples
/// ```
/// use notevault::domain::value::{Email, StorageCodec};
///
/// let email = Email::new("user@example.com").expect("valid email");
/// let column = Email::to_storage(Some(&email));
/// assert_eq!(column.as_deref(), Some("user@example.com"));
/// assert_eq!(Email::from_storage(column), Ok(Some(email)));
/// assert_eq!(Email::from_storage(None), Ok(None));
/// ```
pub trait StorageCodec: Sized {
    /// Raw column representation.
    type Column;

    /// Convert a value into its column representation.
    fn to_storage(value: Option<&Self>) -> Option<Self::Column>;

    /// Rebuild a value from its column representation.
    fn from_storage(column: Option<Self::Column>) -> Result<Option<Self>, ValueValidationError>;
}

impl<R: ValueRule> StorageCodec for Validated<R> {
    type Column = R::Payload;

    fn to_storage(value: Option<&Self>) -> Option<Self::Column> {
        value.map(|inner| inner.value().clone())
    }

    fn from_storage(column: Option<Self::Column>) -> Result<Option<Self>, ValueValidationError> {
        column.map(|raw| Self::new(raw)).transpose()
    }
}
