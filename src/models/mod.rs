//! Data structures for contacts and the persisted record shape.

pub mod contact;

pub use contact::{Contact, ContactFields, ContactRecord};
