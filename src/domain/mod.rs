//! Domain value objects.
//!
//! Type-safe wrapper for contact identifiers plus the generator that mints
//! fresh ones for the `add` operation.

pub mod contact_id;

pub use contact_id::{ContactId, IdGenerator};
