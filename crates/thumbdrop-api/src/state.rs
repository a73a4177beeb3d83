//! Application state shared by all handlers.

use std::sync::Arc;
use thumbdrop_core::{naming_policy_for, Clock, Config, NamingPolicy, SystemClock};
use thumbdrop_processing::{ArchiveExtractor, ThumbnailGenerator, TransportFilter};
use thumbdrop_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub naming: Arc<dyn NamingPolicy>,
    pub clock: Arc<dyn Clock>,
    pub transport_filter: TransportFilter,
}

impl AppState {
    /// State with the configured naming policy and the wall clock.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let naming = naming_policy_for(config.naming_strategy());
        Self::with_parts(config, storage, naming, Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: Config,
        storage: Arc<dyn Storage>,
        naming: Arc<dyn NamingPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            storage,
            naming,
            clock,
            transport_filter: TransportFilter::default(),
        }
    }

    pub fn thumbnail_generator(&self) -> ThumbnailGenerator {
        ThumbnailGenerator::new(self.storage.clone())
    }

    pub fn archive_extractor(&self) -> ArchiveExtractor {
        ArchiveExtractor::new(
            self.storage.clone(),
            self.naming.clone(),
            self.clock.clone(),
            self.config.sanitize_filenames(),
        )
        .with_max_entry_bytes(self.config.max_upload_size_bytes())
    }
}
