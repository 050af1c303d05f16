//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process tables backing the user and note repositories
//! - **hashing**: bcrypt password hasher
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod hashing;
pub mod memory;
