//! Error types for database operations.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Record not found; carries the capitalized resource noun.
    #[error("{0} not found")]
    NotFound(String),
}

impl Error {
    /// Not-found error for the given resource noun, e.g. "Team".
    pub fn not_found(what: &str) -> Self {
        Error::NotFound(what.to_string())
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
