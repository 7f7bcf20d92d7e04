//! Error types for the companion store.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: u32, got: u32 },

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    #[error("Store is locked by another process")]
    Locked,

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Store needs recovery: an interrupted write must be replayed on reopen")]
    NeedsRecovery,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Malformed import: {0}")]
    MalformedImport(String),
}

/// Coarse classification of a [`StoreError`], used by callers to decide
/// how a failure is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The local store cannot be opened, read or written. The session keeps
    /// running on in-memory defaults.
    StorageUnavailable,
    /// An import document could not be parsed at all.
    MalformedImport,
    /// The request itself was rejected (e.g. a nesting violation).
    InvalidOperation,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::MalformedImport(_) => ErrorKind::MalformedImport,
            StoreError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            StoreError::Io(_)
            | StoreError::Serialization(_)
            | StoreError::Deserialization(_)
            | StoreError::Corruption(_)
            | StoreError::ChecksumMismatch { .. }
            | StoreError::InvalidFormat(_)
            | StoreError::Locked
            | StoreError::NotInitialized
            | StoreError::NeedsRecovery => ErrorKind::StorageUnavailable,
        }
    }

    pub fn is_storage_unavailable(&self) -> bool {
        self.kind() == ErrorKind::StorageUnavailable
    }

    /// Plain message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Locked => {
                "Your data is open somewhere else. Changes in this session will not be saved."
                    .to_string()
            }
            StoreError::MalformedImport(_) => {
                "The selected file is not a valid backup.".to_string()
            }
            StoreError::InvalidOperation(reason) => reason.clone(),
            _ => "Local storage is unavailable. Changes in this session will not be saved."
                .to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for StoreError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for StoreError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        StoreError::Deserialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
