//! JSON persistence adapter.

pub mod json_store;

pub use json_store::{ContactsDocument, JsonStore};
