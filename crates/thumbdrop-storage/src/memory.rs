//! In-memory storage backend for tests and ephemeral deployments.

use crate::traits::{validate_key, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Storage held in a shared map. Clones share the same contents.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    files: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = match self.files.read() {
            Ok(files) => files.keys().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
        };
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error<T>(_: T) -> StorageError {
    StorageError::BackendError("Memory storage lock poisoned".to_string())
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        validate_key(key)?;
        let size = data.len();
        self.files
            .write()
            .map_err(lock_error)?
            .insert(key.to_string(), Bytes::from(data));
        tracing::debug!(key = %key, size_bytes = size, "Memory storage write successful");
        Ok(())
    }

    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        validate_key(key)?;
        self.files
            .read()
            .map_err(lock_error)?
            .get(key)
            .map(|data| data.to_vec())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        Ok(self.files.read().map_err(lock_error)?.contains_key(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.files.write().map_err(lock_error)?.remove(key);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
