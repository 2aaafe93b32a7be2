//! # AppError
//!
//! Centralized error handling for the Rusty-Jokes ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all rj-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Joke, User)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., rating out of range, empty joke)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The acting user may not touch this resource (e.g., deleting someone else's joke)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// No acting user could be established for the request
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Opaque failure bubbled up from a `JokeRepo` implementation
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    pub fn joke_not_found(id: uuid::Uuid) -> Self {
        AppError::NotFound("Joke".to_string(), id.to_string())
    }
}

/// A specialized Result type for Rusty-Jokes logic.
pub type Result<T> = std::result::Result<T, AppError>;
