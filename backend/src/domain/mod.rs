//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the validated value types and entities for user accounts
//! and their encrypted notes, plus the services that compose them into
//! ownership-checked workflows. Nothing here knows about HTTP or storage
//! engines; adapters talk to the domain through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable failure category.
//! - value: self-validating value types and the storage codec.
//! - User / Note: entities; Note implements [`OwnedResource`].
//! - UserService / NoteService: driving port implementations.

pub mod error;
pub mod guard;
pub mod note;
pub mod note_service;
pub mod owned;
pub mod ports;
pub mod user;
pub mod user_service;
pub mod value;

pub use self::error::{Error, ErrorCode};
pub use self::guard::{
    MIN_RAW_PASSWORD_LENGTH, decode_base64, validate_caller_id, validate_raw_password,
};
pub use self::note::{NewNote, Note, NoteId};
pub use self::note_service::NoteService;
pub use self::owned::{OwnedResource, authorize, resource_not_found};
pub use self::user::{NewUser, User, UserId};
pub use self::user_service::UserService;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use notevault::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("User id=1 not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
