//! Stateless query engine over a Directory snapshot.

pub mod query;

pub use query::{advanced_search, simple_search, Field, Refinement};
