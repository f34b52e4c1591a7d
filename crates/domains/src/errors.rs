//! # BoardError
//!
//! Centralized error handling for the message board.
//! Maps domain-specific failures to actionable error types.

use std::fmt;

use thiserror::Error;

/// The kind of record a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Thread,
    Reply,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Thread => f.write_str("thread"),
            Entity::Reply => f.write_str("reply"),
        }
    }
}

/// The primary error type for all thread store operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Unknown or malformed thread/reply identifier.
    #[error("{0} not found with ID {1}")]
    NotFound(Entity, String),

    /// A required field is missing or blank.
    #[error("validation error: {0}")]
    Validation(String),

    /// Infrastructure failure (database down, corrupt document).
    #[error("storage error: {0}")]
    Storage(String),
}

impl BoardError {
    pub fn thread_not_found(id: impl fmt::Display) -> Self {
        BoardError::NotFound(Entity::Thread, id.to_string())
    }

    pub fn reply_not_found(id: impl fmt::Display) -> Self {
        BoardError::NotFound(Entity::Reply, id.to_string())
    }

    /// Wraps any backend error as a storage failure.
    pub fn storage(err: impl fmt::Display) -> Self {
        BoardError::Storage(err.to_string())
    }
}

/// A specialized Result type for message board logic.
pub type Result<T> = std::result::Result<T, BoardError>;
