//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{NoteCommand, NoteQuery, UserCommand, UserQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NoteQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        users: Arc<dyn UserCommand>,
        users_query: Arc<dyn UserQuery>,
        notes: Arc<dyn NoteCommand>,
        notes_query: Arc<dyn NoteQuery>,
    ) -> Self {
        Self {
            users,
            users_query,
            notes,
            notes_query,
        }
    }
}
