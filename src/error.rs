//! # Structured Error Handling
//!
//! Error taxonomy for the data-access layer using thiserror for structured
//! error types instead of `Box<dyn Error>` patterns.
//!
//! Read-path fetches deliberately do NOT surface ownership or completeness
//! failures as distinct errors: an absent row, a row owned by another user, and
//! an incomplete row all come back as `Ok(None)`. Collapsing the three keeps
//! callers (and end users) from learning whether somebody else's data exists.
//! `DataError::NotFound` is reserved for mutations that target a missing row.

use thiserror::Error;

/// Errors produced by the question data-access layer.
#[derive(Error, Debug)]
pub enum DataError {
    /// The target row does not exist. Raised by write paths only; read paths
    /// signal absence with `Ok(None)`.
    #[error("record not found")]
    NotFound,

    /// A mutation payload failed validation before reaching the store.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The underlying store rejected the operation or was unreachable.
    /// Propagated as-is; retry policy belongs to the pool, not this layer.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bad or missing configuration at startup.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl DataError {
    pub fn validation(message: impl Into<String>) -> Self {
        DataError::Validation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
