//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod note_command;
mod note_query;
mod note_repository;
mod password_hasher;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use note_command::MockNoteCommand;
pub use note_command::{NoteChange, NoteCommand};
#[cfg(test)]
pub use note_query::MockNoteQuery;
pub use note_query::NoteQuery;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::UserCommand;
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
