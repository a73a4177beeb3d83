//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Handlers and processors only see this trait, so tests can swap the
/// filesystem for `MemoryStorage`. Writes to an existing key replace it (last
/// writer wins); there is no locking between concurrent writers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, creating intermediate directories as needed.
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read the bytes stored under `key`.
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Delete a file. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Shared key check used by every backend.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if !thumbdrop_core::validation::is_safe_key(key) {
        return Err(StorageError::InvalidKey(format!(
            "Storage key '{}' is empty, absolute or contains '..'",
            key
        )));
    }
    Ok(())
}
