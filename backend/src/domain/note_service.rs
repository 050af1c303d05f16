//! Encrypted note service.
//!
//! Every workflow runs the same ordered steps and stops at the first failure:
//! caller id validation, owner existence (create only), Base64 decoding,
//! domain validation, lookup by uuid, ownership authorization, persistence.
//! Updates authorize against the stored snapshot before mutating it, so a
//! rejected caller never produces a modified entity.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{
    NoteChange, NoteCommand, NoteQuery, NoteRepository, NoteRepositoryError, UserRepository,
};
use crate::domain::user_service::require_user;
use crate::domain::value::{EncryptedContent, EncryptedTitle};
use crate::domain::{
    Error, NewNote, Note, OwnedResource, UserId, authorize, decode_base64, resource_not_found,
    validate_caller_id,
};

fn map_note_repository_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::DuplicateUuid { uuid } => {
            Error::already_exists(format!("Note with uuid={uuid} already exists"))
        }
        NoteRepositoryError::MissingOwner { owner_id } => {
            Error::not_found(format!("User id={owner_id} not found"))
        }
        NoteRepositoryError::Connection { message } => {
            Error::internal(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
    }
}

fn decode_payload(field: &'static str, payload: Option<&str>) -> Result<Vec<u8>, Error> {
    debug!(field, "decoding payload");
    decode_base64(payload)
}

/// Validated replacement values, built before the note is looked up.
///
/// Every present payload is decoded before any of them is validated, so a
/// transport failure on one field wins over a domain failure on another.
struct Replacement {
    title: Option<EncryptedTitle>,
    content: Option<EncryptedContent>,
}

impl TryFrom<NoteChange> for Replacement {
    type Error = Error;

    fn try_from(change: NoteChange) -> Result<Self, Self::Error> {
        let (title, content) = match change {
            NoteChange::Title(title) => (Some(decode_payload("title", title.as_deref())?), None),
            NoteChange::Content(content) => {
                (None, Some(decode_payload("content", content.as_deref())?))
            }
            NoteChange::TitleAndContent { title, content } => (
                Some(decode_payload("title", title.as_deref())?),
                Some(decode_payload("content", content.as_deref())?),
            ),
        };
        debug!("validating note values");
        Ok(Self {
            title: title.map(EncryptedTitle::new).transpose()?,
            content: content.map(EncryptedContent::new).transpose()?,
        })
    }
}

impl Replacement {
    fn apply(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.change_title(title);
        }
        if let Some(content) = self.content {
            note.change_content(content);
        }
    }
}

/// Note service implementing the note driving ports.
#[derive(Clone)]
pub struct NoteService<N, U> {
    note_repo: Arc<N>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<N, U> NoteService<N, U> {
    /// Create a new service with its repositories and clock.
    pub fn new(note_repo: Arc<N>, user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            note_repo,
            user_repo,
            clock,
        }
    }
}

impl<N, U> NoteService<N, U>
where
    N: NoteRepository,
    U: UserRepository,
{
    async fn locate(&self, uuid: Uuid) -> Result<Note, Error> {
        debug!(%uuid, "locating note");
        self.note_repo
            .find_by_uuid(&uuid)
            .await
            .map_err(map_note_repository_error)?
            .ok_or_else(|| resource_not_found::<Note>(uuid))
    }

    async fn locate_owned(&self, owner_id: UserId, uuid: Uuid) -> Result<Note, Error> {
        let note = self.locate(uuid).await?;
        debug!(%uuid, "authorizing caller");
        authorize(&note, owner_id)?;
        Ok(note)
    }
}

#[async_trait]
impl<N, U> NoteCommand for NoteService<N, U>
where
    N: NoteRepository,
    U: UserRepository,
{
    async fn create_note(
        &self,
        owner_id: Option<i64>,
        uuid: Uuid,
        title_b64: Option<String>,
        content_b64: Option<String>,
    ) -> Result<Note, Error> {
        info!(owner_id = ?owner_id, %uuid, "creating note");

        debug!("validating owner id");
        let owner_id = validate_caller_id(owner_id)?;

        debug!("checking owner existence");
        require_user(self.user_repo.as_ref(), owner_id).await?;

        let title = decode_payload("title", title_b64.as_deref())?;
        let content = decode_payload("content", content_b64.as_deref())?;

        debug!("validating note values");
        let title = EncryptedTitle::new(title)?;
        let content = EncryptedContent::new(content)?;

        debug!("persisting note");
        let note = self
            .note_repo
            .insert(&NewNote {
                uuid,
                owner_id,
                title,
                content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_note_repository_error)?;

        info!(owner_id = %owner_id, %uuid, "note created");
        Ok(note)
    }

    async fn update_note(
        &self,
        owner_id: Option<i64>,
        uuid: Uuid,
        change: NoteChange,
    ) -> Result<Note, Error> {
        info!(owner_id = ?owner_id, %uuid, "updating note");

        debug!("validating owner id");
        let owner_id = validate_caller_id(owner_id)?;
        let replacement = Replacement::try_from(change)?;

        let mut note = self.locate_owned(owner_id, uuid).await?;
        replacement.apply(&mut note);
        note.touch(self.clock.utc());

        debug!("persisting note");
        let note = self
            .note_repo
            .save(&note)
            .await
            .map_err(map_note_repository_error)?;

        info!(owner_id = %owner_id, %uuid, "note updated");
        Ok(note)
    }

    async fn delete_note(&self, owner_id: Option<i64>, uuid: Uuid) -> Result<(), Error> {
        info!(owner_id = ?owner_id, %uuid, "deleting note");

        debug!("validating owner id");
        let owner_id = validate_caller_id(owner_id)?;
        let note = self.locate_owned(owner_id, uuid).await?;

        debug!("deleting note row");
        self.note_repo
            .delete(&note)
            .await
            .map_err(map_note_repository_error)?;

        info!(owner_id = %owner_id, %uuid, "note deleted");
        Ok(())
    }
}

#[async_trait]
impl<N, U> NoteQuery for NoteService<N, U>
where
    N: NoteRepository,
    U: UserRepository,
{
    async fn list_notes(&self, owner_id: Option<i64>) -> Result<Vec<Note>, Error> {
        info!(owner_id = ?owner_id, "listing notes");

        debug!("validating owner id");
        let owner_id = validate_caller_id(owner_id)?;
        let notes = self
            .note_repo
            .find_all_by_owner(owner_id)
            .await
            .map_err(map_note_repository_error)?;

        info!(owner_id = %owner_id, count = notes.len(), "notes retrieved");
        Ok(notes)
    }

    async fn get_note(&self, owner_id: Option<i64>, uuid: Uuid) -> Result<Note, Error> {
        info!(owner_id = ?owner_id, %uuid, "getting note");

        debug!("validating owner id");
        let owner_id = validate_caller_id(owner_id)?;
        let note = self.locate_owned(owner_id, uuid).await?;

        info!(owner_id = %owner_id, %uuid, "note retrieved");
        Ok(note)
    }
}

#[cfg(test)]
#[path = "note_service_tests.rs"]
mod tests;
