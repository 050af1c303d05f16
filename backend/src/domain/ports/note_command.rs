//! Driving port for encrypted note mutations.
//!
//! Encrypted payloads travel as standard Base64 strings. Implementations
//! decode them, validate the resulting blobs, and enforce ownership before
//! anything is persisted.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Note};

/// Replacement values for an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteChange {
    /// Replace the title only.
    Title(Option<String>),
    /// Replace the content only.
    Content(Option<String>),
    /// Replace both fields together.
    TitleAndContent {
        title: Option<String>,
        content: Option<String>,
    },
}

/// Domain use-case port for creating, updating, and deleting notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteCommand: Send + Sync {
    /// Create a note with a caller-supplied uuid.
    async fn create_note(
        &self,
        owner_id: Option<i64>,
        uuid: Uuid,
        title_b64: Option<String>,
        content_b64: Option<String>,
    ) -> Result<Note, Error>;

    /// Apply `change` to the caller's note.
    async fn update_note(
        &self,
        owner_id: Option<i64>,
        uuid: Uuid,
        change: NoteChange,
    ) -> Result<Note, Error>;

    /// Delete the caller's note.
    async fn delete_note(&self, owner_id: Option<i64>, uuid: Uuid) -> Result<(), Error>;
}
