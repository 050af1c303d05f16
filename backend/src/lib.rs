//! Notevault backend library.
//!
//! - [`domain`]: validated value types, entities, ports and the account and
//!   note services
//! - [`outbound`]: in-process store and bcrypt hasher adapters
//! - [`inbound`]: actix-web handlers
//! - [`server`]: application assembly
//! - [`settings`]: layered configuration

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
pub mod settings;
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
