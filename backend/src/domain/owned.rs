//! Shape shared by every record that belongs to exactly one user.
//!
//! Ownership is enforced by services through [`authorize`]; entities never
//! check it themselves.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// A record owned by one user and addressed externally by a stable uuid.
pub trait OwnedResource {
    /// Resource name used in caller-visible messages.
    const KIND: &'static str;

    /// Owning user. Never reassigned.
    fn owner_id(&self) -> UserId;

    /// Externally visible identity. Assigned once at creation.
    fn uuid(&self) -> Uuid;

    /// Creation timestamp.
    fn created_at(&self) -> DateTime<Utc>;

    /// Last mutation timestamp, absent until the first change.
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Record that the resource was mutated at `at`.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Fail with a forbidden error unless `caller` owns `resource`.
///
/// # Examples
/// ```
/// use chrono::{DateTime, Utc};
/// use notevault::domain::{ErrorCode, OwnedResource, UserId, authorize};
/// use uuid::Uuid;
///
/// struct Doc(UserId);
///
/// impl OwnedResource for Doc {
///     const KIND: &'static str = "Doc";
///     fn owner_id(&self) -> UserId { self.0 }
///     fn uuid(&self) -> Uuid { Uuid::nil() }
///     fn created_at(&self) -> DateTime<Utc> { DateTime::<Utc>::MIN_UTC }
///     fn updated_at(&self) -> Option<DateTime<Utc>> { None }
///     fn touch(&mut self, _at: DateTime<Utc>) {}
/// }
///
/// let owner = UserId::new(1).expect("valid id");
/// let stranger = UserId::new(2).expect("valid id");
/// assert!(authorize(&Doc(owner), owner).is_ok());
/// let err = authorize(&Doc(owner), stranger).expect_err("not the owner");
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// assert_eq!(err.message(), "Permission denied for user with ID: 2");
/// ```
pub fn authorize<T: OwnedResource>(resource: &T, caller: UserId) -> Result<(), Error> {
    if resource.owner_id() != caller {
        return Err(Error::forbidden(format!(
            "Permission denied for user with ID: {caller}"
        )));
    }
    Ok(())
}

/// Not-found error for a resource kind addressed by uuid.
pub fn resource_not_found<T: OwnedResource>(uuid: Uuid) -> Error {
    Error::not_found(format!("{} with uuid={uuid} was not found", T::KIND))
}
