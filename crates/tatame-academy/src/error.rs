//! Error types for the academy node.

use thiserror::Error;

/// Result type for academy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in academy operations.
///
/// Display strings double as HTTP error bodies, so the user-facing
/// variants spell out the exact wire message.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found ("Student not found", "Account not found")
    #[error("{0} not found")]
    NotFound(String),

    /// Required request field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provisioning hit an email that already has an account
    #[error("Email already registered")]
    EmailTaken,

    /// Caller has no valid session
    #[error("{0}")]
    Unauthorized(String),

    /// Caller's role does not allow the operation
    #[error("Access denied")]
    Forbidden,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rocksdb::Error> for Error {
    fn from(e: rocksdb::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
