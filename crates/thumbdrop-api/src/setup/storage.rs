//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use thumbdrop_core::Config;
use thumbdrop_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        upload_dir = %config.upload_dir(),
        "Storage initialized successfully"
    );
    Ok(storage)
}
