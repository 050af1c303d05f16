//! Encrypted note entity.
//!
//! Notes are the owned resource synchronised between a user's devices. The
//! server never sees plaintext: title and content arrive as opaque encrypted
//! blobs and are only checked for size.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value::{EncryptedContent, EncryptedTitle};
use crate::domain::{OwnedResource, UserId};

/// Storage-assigned internal note identifier. Never exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a storage-assigned identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Validated fields for a note that storage has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub uuid: Uuid,
    pub owner_id: UserId,
    pub title: EncryptedTitle,
    pub content: EncryptedContent,
    pub created_at: DateTime<Utc>,
}

/// Encrypted note owned by a single user.
///
/// ## Invariants
/// - `uuid` and `owner_id` are fixed at creation.
/// - `title` and `content` always hold validated blobs and are replaced
///   wholesale, never edited in place.
/// - `updated_at` is `None` until the first mutation is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    uuid: Uuid,
    owner_id: UserId,
    title: EncryptedTitle,
    content: EncryptedContent,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Build a note from its storage-assigned id and validated fields.
    pub fn new(id: NoteId, draft: NewNote) -> Self {
        let NewNote {
            uuid,
            owner_id,
            title,
            content,
            created_at,
        } = draft;
        Self {
            id,
            uuid,
            owner_id,
            title,
            content,
            created_at,
            updated_at: None,
        }
    }

    /// Internal storage identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Encrypted title blob.
    pub fn title(&self) -> &EncryptedTitle {
        &self.title
    }

    /// Encrypted content blob.
    pub fn content(&self) -> &EncryptedContent {
        &self.content
    }

    /// Replace the title with a freshly validated blob.
    pub fn change_title(&mut self, title: EncryptedTitle) {
        self.title = title;
    }

    /// Replace the content with a freshly validated blob.
    pub fn change_content(&mut self, content: EncryptedContent) {
        self.content = content;
    }
}

impl OwnedResource for Note {
    const KIND: &'static str = "Note";

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}
