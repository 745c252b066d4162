//! Error types for Rolodex.
//!
//! This module defines custom error types using `thiserror`. Business
//! conditions like an empty search result are not errors here: lookups return
//! `Option`/empty vectors, and only malformed input documents and
//! configuration problems surface as `Err`.

use thiserror::Error;

/// Errors that can occur in the persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The contacts file could not be read or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The contacts file exists but is not a valid contacts document
    #[error("'{path}' is not in the correct format: {reason}")]
    Malformed { path: String, reason: String },

    /// The contacts file does not exist
    #[error("No contacts file was found for '{0}'")]
    NotFound(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
