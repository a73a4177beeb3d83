//! Application setup and initialization
//!
//! Initialization logic kept out of main.rs so tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use std::sync::Arc;
use thumbdrop_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate()?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        naming_strategy = ?config.naming_strategy(),
        sanitize_filenames = config.sanitize_filenames(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;
    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
