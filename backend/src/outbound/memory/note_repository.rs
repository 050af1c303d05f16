//! In-process `NoteRepository` implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{NewNote, Note, UserId};

use super::rows::NoteRow;
use super::{MemoryStore, Tables};

/// Note repository over the shared [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryNoteRepository {
    store: MemoryStore,
}

impl MemoryNoteRepository {
    /// Create a repository over `store`.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn to_note(row: &NoteRow) -> Result<Note, NoteRepositoryError> {
    row.to_note().map_err(NoteRepositoryError::query)
}

fn insert_note(tables: &mut Tables, note: &NewNote) -> Result<Note, NoteRepositoryError> {
    let owner_id = note.owner_id.get();
    if !tables.users.contains_key(&owner_id) {
        return Err(NoteRepositoryError::missing_owner(owner_id));
    }
    if tables.notes_by_uuid.contains_key(&note.uuid) {
        return Err(NoteRepositoryError::duplicate_uuid(note.uuid));
    }
    let id = tables.next_note_id();
    let row = NoteRow::from_new(id, note);
    let stored = to_note(&row)?;
    tables.notes_by_uuid.insert(note.uuid, id);
    tables.notes.insert(id, row);
    Ok(stored)
}

fn save_note(tables: &mut Tables, note: &Note) -> Result<Note, NoteRepositoryError> {
    let id = note.id().get();
    let row = tables
        .notes
        .get_mut(&id)
        .ok_or_else(|| NoteRepositoryError::query(format!("note {id} does not exist")))?;
    let mut updated = row.clone();
    updated.apply(note);
    let stored = to_note(&updated)?;
    *row = updated;
    Ok(stored)
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        self.store
            .transact(NoteRepositoryError::connection, |tables| {
                insert_note(tables, note)
            })
    }

    async fn save(&self, note: &Note) -> Result<Note, NoteRepositoryError> {
        self.store
            .transact(NoteRepositoryError::connection, |tables| {
                save_note(tables, note)
            })
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Note>, NoteRepositoryError> {
        self.store
            .transact(NoteRepositoryError::connection, |tables| {
                tables
                    .notes_by_uuid
                    .get(uuid)
                    .and_then(|id| tables.notes.get(id))
                    .map(to_note)
                    .transpose()
            })
    }

    async fn find_all_by_owner(&self, owner_id: UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        self.store
            .transact(NoteRepositoryError::connection, |tables| {
                tables
                    .notes
                    .values()
                    .filter(|row| row.owner_id == owner_id.get())
                    .map(to_note)
                    .collect()
            })
    }

    async fn delete(&self, note: &Note) -> Result<(), NoteRepositoryError> {
        self.store
            .transact(NoteRepositoryError::connection, |tables| {
                tables.remove_note(note.id().get());
                Ok(())
            })
    }
}
