#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-memory")]
use crate::MemoryStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use thumbdrop_core::Config;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let upload_dir = config.upload_dir();
            if upload_dir.trim().is_empty() {
                return Err(StorageError::ConfigError(
                    "UPLOAD_DIR not configured".to_string(),
                ));
            }
            let storage = LocalStorage::new(upload_dir).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; uploads are lost on restart");
            Ok(Arc::new(MemoryStorage::new()))
        }

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)"
                .to_string(),
        )),
    }
}
