//! Raw table rows and their conversion to domain entities.
//!
//! Rows hold column values exactly as a relational store would: plain
//! strings, byte vectors, and nullable columns. Domain values are rebuilt via
//! [`StorageCodec`] on every read so a corrupt row never yields an entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value::{
    Email, EncryptedContent, EncryptedTitle, PasswordHash, StorageCodec, ValueValidationError,
};
use crate::domain::{NewNote, NewUser, Note, NoteId, OwnedResource, User, UserId};

/// Row in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct UserRow {
    pub id: i64,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct NoteRow {
    pub id: i64,
    pub uuid: Uuid,
    pub owner_id: i64,
    pub title: Option<Vec<u8>>,
    pub content: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn required<T>(
    table: &str,
    column: &str,
    decoded: Result<Option<T>, ValueValidationError>,
) -> Result<T, String> {
    decoded
        .map_err(|err| format!("corrupt {table}.{column}: {err}"))?
        .ok_or_else(|| format!("corrupt {table}.{column}: column is null"))
}

fn row_id(table: &str, raw: i64) -> Result<UserId, String> {
    UserId::new(raw).map_err(|err| format!("corrupt {table} id {raw}: {err}"))
}

impl UserRow {
    pub fn from_new(id: i64, user: &NewUser) -> Self {
        Self {
            id,
            email: Email::to_storage(Some(&user.email)),
            password_hash: PasswordHash::to_storage(Some(&user.password_hash)),
            created_at: user.created_at,
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().get(),
            email: Email::to_storage(Some(user.email())),
            password_hash: PasswordHash::to_storage(Some(user.password_hash())),
            created_at: user.created_at(),
        }
    }

    pub fn to_user(&self) -> Result<User, String> {
        let id = row_id("users", self.id)?;
        let email = required("users", "email", Email::from_storage(self.email.clone()))?;
        let password_hash = required(
            "users",
            "password_hash",
            PasswordHash::from_storage(self.password_hash.clone()),
        )?;
        Ok(User::new(
            id,
            NewUser {
                email,
                password_hash,
                created_at: self.created_at,
            },
        ))
    }
}

impl NoteRow {
    pub fn from_new(id: i64, note: &NewNote) -> Self {
        Self {
            id,
            uuid: note.uuid,
            owner_id: note.owner_id.get(),
            title: EncryptedTitle::to_storage(Some(&note.title)),
            content: EncryptedContent::to_storage(Some(&note.content)),
            created_at: note.created_at,
            updated_at: None,
        }
    }

    /// Overwrite the mutable columns from `note`.
    pub fn apply(&mut self, note: &Note) {
        self.title = EncryptedTitle::to_storage(Some(note.title()));
        self.content = EncryptedContent::to_storage(Some(note.content()));
        self.updated_at = note.updated_at();
    }

    pub fn to_note(&self) -> Result<Note, String> {
        let owner_id = row_id("notes.owner", self.owner_id)?;
        let title = required(
            "notes",
            "title",
            EncryptedTitle::from_storage(self.title.clone()),
        )?;
        let content = required(
            "notes",
            "content",
            EncryptedContent::from_storage(self.content.clone()),
        )?;
        let mut note = Note::new(
            NoteId::new(self.id),
            NewNote {
                uuid: self.uuid,
                owner_id,
                title,
                content,
                created_at: self.created_at,
            },
        );
        if let Some(updated_at) = self.updated_at {
            note.touch(updated_at);
        }
        Ok(note)
    }
}
