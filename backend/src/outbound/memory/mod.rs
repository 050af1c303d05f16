//! In-process relational-style store backing the repository ports.
//!
//! A single mutex guards both tables and their unique indexes. Every
//! repository call runs as one critical section, which makes each call an
//! all-or-nothing unit of work: no other caller can observe a half-applied
//! write. Deleting a user cascades to the notes they own.
//!
//! ```
//! use notevault::outbound::memory::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let users = store.user_repository();
//! let notes = store.note_repository();
//! # let _ = (users, notes);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

mod note_repository;
mod rows;
mod user_repository;

pub use note_repository::MemoryNoteRepository;
pub use user_repository::MemoryUserRepository;

use rows::{NoteRow, UserRow};

/// Tables, sequences, and unique indexes.
#[derive(Debug, Default)]
struct Tables {
    last_user_id: i64,
    last_note_id: i64,
    users: BTreeMap<i64, UserRow>,
    notes: BTreeMap<i64, NoteRow>,
    users_by_email: HashMap<String, i64>,
    notes_by_uuid: HashMap<Uuid, i64>,
}

impl Tables {
    fn next_user_id(&mut self) -> i64 {
        self.last_user_id += 1;
        self.last_user_id
    }

    fn next_note_id(&mut self) -> i64 {
        self.last_note_id += 1;
        self.last_note_id
    }

    fn remove_note(&mut self, id: i64) -> Option<NoteRow> {
        let row = self.notes.remove(&id)?;
        self.notes_by_uuid.remove(&row.uuid);
        Some(row)
    }

    fn remove_user_cascading(&mut self, id: i64) -> Option<UserRow> {
        let row = self.users.remove(&id)?;
        if let Some(email) = row.email.as_ref() {
            self.users_by_email.remove(email);
        }
        let owned: Vec<i64> = self
            .notes
            .values()
            .filter(|note| note.owner_id == id)
            .map(|note| note.id)
            .collect();
        for note_id in owned {
            self.remove_note(note_id);
        }
        Some(row)
    }
}

/// Shared handle to the in-process tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// User repository backed by this store.
    pub fn user_repository(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(self.clone())
    }

    /// Note repository backed by this store.
    pub fn note_repository(&self) -> MemoryNoteRepository {
        MemoryNoteRepository::new(self.clone())
    }

    /// Run `work` inside the store's critical section.
    ///
    /// A poisoned lock is reported through `unavailable`.
    fn transact<T, E>(
        &self,
        unavailable: impl FnOnce(String) -> E,
        work: impl FnOnce(&mut Tables) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard: MutexGuard<'_, Tables> = self
            .tables
            .lock()
            .map_err(|err| unavailable(format!("store lock poisoned: {err}")))?;
        work(&mut guard)
    }
}

#[cfg(test)]
mod tests;
