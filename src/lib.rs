//! Rolodex - a local, interactive contact manager.
//!
//! Rolodex keeps a set of contacts (name, phone, email, company, notes,
//! group memberships) in memory, persists them to a JSON file, and offers a
//! line-oriented command shell for adding, editing, removing, searching,
//! and grouping contacts.
//!
//! # Architecture
//!
//! - **domain**: `ContactId` value object and identifier generation
//! - **models**: the `Contact` entity and the flat persisted record shape
//! - **directory**: the in-memory store owning contacts and the derived
//!   company/group indexes, with all mutating operations
//! - **search**: stateless simple and field-refined search over a directory
//! - **store**: JSON file persistence (load/save with atomic rename)
//! - **shell**: the interactive REPL, command grammar, and rendering
//! - **config**: configuration from environment variables
//! - **error**: custom error types for precise error handling

pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod models;
pub mod search;
pub mod shell;
pub mod store;

pub use config::Config;
pub use directory::{Directory, GroupChange};
pub use domain::{ContactId, IdGenerator};
pub use error::{ConfigError, StoreError};
pub use models::{Contact, ContactFields, ContactRecord};
pub use search::{advanced_search, simple_search, Field, Refinement};
pub use shell::Shell;
pub use store::JsonStore;
