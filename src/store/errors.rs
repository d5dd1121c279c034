//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Caller violated an operation precondition (empty upload, unsafe name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The referenced name has no backing file
    #[error("File not found: {0}")]
    NotFound(String),

    /// The rename target is already occupied
    #[error("Name already in use: {0}")]
    Conflict(String),

    /// Underlying filesystem call failed (permissions, disk full, device error)
    #[error("I/O error: {0}")]
    Io(String),
}

impl StorageError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::InvalidInput(_) => 400,
            StorageError::NotFound(_) => 404,
            StorageError::Conflict(_) => 409,
            StorageError::Io(_) => 500,
        }
    }
}
