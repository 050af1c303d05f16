//! Port for encrypted note persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewNote, Note, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// The unique uuid index rejected the insert.
        DuplicateUuid { uuid: Uuid } => "note uuid already taken: {uuid}",
        /// The owning user no longer exists.
        MissingOwner { owner_id: i64 } => "note owner {owner_id} does not exist",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "note repository query failed: {message}",
    }
}

/// Storage contract for encrypted notes.
///
/// Each call is one unit of work; adapters never expose a partially applied
/// write. Last successful save wins; no revision is tracked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return it with its storage-assigned id.
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError>;

    /// Persist changes to an existing note.
    async fn save(&self, note: &Note) -> Result<Note, NoteRepositoryError>;

    /// Fetch a note by its external uuid.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Note>, NoteRepositoryError>;

    /// Fetch every note owned by `owner_id`, oldest first.
    async fn find_all_by_owner(&self, owner_id: UserId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Delete a note.
    async fn delete(&self, note: &Note) -> Result<(), NoteRepositoryError>;
}
