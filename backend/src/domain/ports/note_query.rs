//! Driving port for encrypted note reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Note};

/// Domain use-case port for reading a caller's notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteQuery: Send + Sync {
    /// Fetch every note the caller owns.
    async fn list_notes(&self, owner_id: Option<i64>) -> Result<Vec<Note>, Error>;

    /// Fetch one note, provided the caller owns it.
    async fn get_note(&self, owner_id: Option<i64>, uuid: Uuid) -> Result<Note, Error>;
}
