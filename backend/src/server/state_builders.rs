//! Builders wiring driven adapters into the domain services behind the
//! handler state.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::PasswordHasher;
use crate::domain::{NoteService, UserService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;

/// Build handler state over one shared store.
///
/// Both services read accounts through the same repository, so the owner
/// check for notes sees exactly what the account endpoints wrote.
///
/// # Examples
/// ```
/// use mockable::DefaultClock;
/// use notevault::domain::ports::FixturePasswordHasher;
/// use notevault::outbound::memory::MemoryStore;
/// use notevault::server::build_http_state;
/// use std::sync::Arc;
///
/// let state = build_http_state(&MemoryStore::new(), FixturePasswordHasher, Arc::new(DefaultClock));
/// # drop(state);
/// ```
pub fn build_http_state<H>(store: &MemoryStore, hasher: H, clock: Arc<dyn Clock>) -> HttpState
where
    H: PasswordHasher + 'static,
{
    let user_repo = Arc::new(store.user_repository());
    let users = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::new(hasher),
        Arc::clone(&clock),
    ));
    let notes = Arc::new(NoteService::new(
        Arc::new(store.note_repository()),
        user_repo,
        clock,
    ));

    HttpState::new(users.clone(), users, notes.clone(), notes)
}
