//! Zip archive extraction
//!
//! Image entries (by name) are written to storage under a fresh stored name each,
//! keeping any directories from the archive. Everything else in the archive is
//! ignored, and an entry that cannot be read, exceeds the entry size cap or cannot
//! be written is skipped. Entries are decompressed on a blocking thread and handed
//! over one at a time, so at most a couple of entries are in memory at once.

use crate::error::{ProcessingError, ProcessingResult};
use crate::validator::is_image_entry;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::time::Instant;
use thumbdrop_core::models::{DerivedArtifact, PublicBase};
use thumbdrop_core::validation::sanitize_entry_path;
use thumbdrop_core::{Clock, NamingPolicy};
use thumbdrop_storage::Storage;
use tokio::sync::mpsc;

/// Default cap on the decompressed size of a single entry.
pub const DEFAULT_MAX_ENTRY_BYTES: usize = 50 * 1024 * 1024;

/// A file read out of an archive, held only until it is written.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub entry_name: String,
    pub raw_bytes: Vec<u8>,
}

pub struct ArchiveExtractor {
    storage: Arc<dyn Storage>,
    naming: Arc<dyn NamingPolicy>,
    clock: Arc<dyn Clock>,
    sanitize: bool,
    max_entry_bytes: usize,
}

impl ArchiveExtractor {
    pub fn new(
        storage: Arc<dyn Storage>,
        naming: Arc<dyn NamingPolicy>,
        clock: Arc<dyn Clock>,
        sanitize: bool,
    ) -> Self {
        Self {
            storage,
            naming,
            clock,
            sanitize,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }

    /// Skip entries whose decompressed size exceeds `max_entry_bytes`.
    pub fn with_max_entry_bytes(mut self, max_entry_bytes: usize) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    /// Extract the image entries of the stored archive at `archive_key`.
    ///
    /// Artifacts follow the archive's entry order. Fails only when the archive
    /// itself cannot be read or opened.
    #[tracing::instrument(skip(self, base))]
    pub async fn extract(
        &self,
        archive_key: &str,
        base: &PublicBase,
    ) -> ProcessingResult<Vec<DerivedArtifact>> {
        let start = Instant::now();
        let data = self.storage.read(archive_key).await?;

        let (tx, mut rx) = mpsc::channel::<ArchiveEntry>(1);
        let max_entry_bytes = self.max_entry_bytes;
        let reader =
            tokio::task::spawn_blocking(move || read_image_entries(data, max_entry_bytes, tx));

        let mut artifacts = Vec::new();
        while let Some(entry) = rx.recv().await {
            if let Some(artifact) = self.store_entry(entry, base).await {
                artifacts.push(artifact);
            }
        }

        let matched = reader.await??;

        tracing::info!(
            matched_entries = matched,
            stored_entries = artifacts.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Archive extracted"
        );

        Ok(artifacts)
    }

    async fn store_entry(&self, entry: ArchiveEntry, base: &PublicBase) -> Option<DerivedArtifact> {
        let name = if self.sanitize {
            match sanitize_entry_path(&entry.entry_name) {
                Some(name) => name,
                None => {
                    tracing::warn!(entry = %entry.entry_name, "Skipping archive entry with no usable name");
                    return None;
                }
            }
        } else {
            entry.entry_name.clone()
        };

        let stored_name = self.naming.name(&name, self.clock.now_millis());

        match self.storage.write(&stored_name, entry.raw_bytes).await {
            Ok(()) => Some(base.artifact(&stored_name)),
            Err(e) => {
                tracing::warn!(
                    entry = %entry.entry_name,
                    stored_name = %stored_name,
                    error = %e,
                    "Skipping archive entry that could not be stored"
                );
                None
            }
        }
    }
}

/// Send image entries in index order, returning how many matched by name.
///
/// Directories, unreadable entries and entries over `max_entry_bytes` are skipped.
/// Runs on a blocking thread; stops early if the receiver goes away.
fn read_image_entries(
    data: Vec<u8>,
    max_entry_bytes: usize,
    tx: mpsc::Sender<ArchiveEntry>,
) -> ProcessingResult<usize> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ProcessingError::Archive(e.to_string()))?;

    let mut matched = 0;
    for index in 0..archive.len() {
        let mut file = match archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable archive entry");
                continue;
            }
        };

        if file.is_dir() {
            continue;
        }

        let entry_name = file.name().to_string();
        if !is_image_entry(&entry_name) {
            continue;
        }
        matched += 1;

        let declared_size = file.size();
        if declared_size > max_entry_bytes as u64 {
            tracing::warn!(
                entry = %entry_name,
                size_bytes = declared_size,
                max_entry_bytes,
                "Skipping oversized archive entry"
            );
            continue;
        }

        // The declared size is not trusted; read at most one byte past the cap.
        let mut raw_bytes = Vec::new();
        if let Err(e) = (&mut file)
            .take(max_entry_bytes as u64 + 1)
            .read_to_end(&mut raw_bytes)
        {
            tracing::warn!(entry = %entry_name, error = %e, "Skipping corrupt archive entry");
            continue;
        }
        if raw_bytes.len() > max_entry_bytes {
            tracing::warn!(
                entry = %entry_name,
                max_entry_bytes,
                "Skipping oversized archive entry"
            );
            continue;
        }

        let entry = ArchiveEntry {
            entry_name,
            raw_bytes,
        };
        if tx.blocking_send(entry).is_err() {
            break;
        }
    }

    Ok(matched)
}
