//! Thumbnail generation
//!
//! Sources of at least 128x128 get one thumbnail per standard width, stored
//! next to the original as `thumb{width}-{stored_name}`. Smaller sources stand
//! in as their own thumbnail and nothing is written.

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::processor::{decode, probe};
use crate::image::resize::ImageResize;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;
use thumbdrop_core::models::{DerivedArtifact, PublicBase, ThumbnailSpec};
use thumbdrop_core::thumbnail_name;
use thumbdrop_storage::Storage;

/// Thumbnails rendered in memory, ascending by width.
enum ThumbnailPlan {
    UseOriginal,
    Rendered(Vec<(String, Vec<u8>)>),
}

pub struct ThumbnailGenerator {
    storage: Arc<dyn Storage>,
}

impl ThumbnailGenerator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Derive thumbnails for the stored file at `source_key`.
    ///
    /// Returns two artifacts (32px then 64px) or the original's artifact alone.
    /// Writes nothing unless every thumbnail encoded.
    #[tracing::instrument(skip(self, base))]
    pub async fn generate(
        &self,
        source_key: &str,
        base: &PublicBase,
    ) -> ProcessingResult<Vec<DerivedArtifact>> {
        let start = Instant::now();
        let data = self.storage.read(source_key).await?;

        let key = source_key.to_string();
        let plan = tokio::task::spawn_blocking(move || render_thumbnails(&key, &data)).await??;

        let rendered = match plan {
            ThumbnailPlan::UseOriginal => {
                tracing::debug!("Source below thumbnail threshold, original stands in");
                return Ok(vec![base.artifact(source_key)]);
            }
            ThumbnailPlan::Rendered(rendered) => rendered,
        };

        let mut written: Vec<String> = Vec::with_capacity(rendered.len());
        for (key, bytes) in rendered {
            if let Err(e) = self.storage.write(&key, bytes).await {
                self.discard(&written).await;
                return Err(e.into());
            }
            written.push(key);
        }

        tracing::info!(
            count = written.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Thumbnails generated"
        );

        Ok(written.iter().map(|key| base.artifact(key)).collect())
    }

    async fn discard(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(key = %key, error = %e, "Failed to remove partial thumbnail");
            }
        }
    }
}

fn render_thumbnails(source_key: &str, data: &[u8]) -> ProcessingResult<ThumbnailPlan> {
    let metadata = probe(data)?;
    if !metadata.qualifies_for_thumbnails() {
        return Ok(ThumbnailPlan::UseOriginal);
    }

    let (img, source_format) = decode(data)?;
    let format = output_format(source_key, source_format);

    ThumbnailSpec::standard()
        .into_iter()
        .map(|spec| {
            let resized = ImageResize::resize_to_width(&img, spec.target_width_px);
            let bytes = encode(resized, format)?;
            Ok((thumbnail_name(spec.target_width_px, source_key), bytes))
        })
        .collect::<ProcessingResult<Vec<_>>>()
        .map(ThumbnailPlan::Rendered)
}

/// Encoding for a thumbnail: the stored name's extension wins, then the source format.
fn output_format(source_key: &str, source_format: ImageFormat) -> ImageFormat {
    ImageFormat::from_path(source_key)
        .ok()
        .filter(|f| is_writable(*f))
        .or_else(|| Some(source_format).filter(|f| is_writable(*f)))
        .unwrap_or(ImageFormat::Png)
}

fn is_writable(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP
    )
}

fn encode(img: DynamicImage, format: ImageFormat) -> ProcessingResult<Vec<u8>> {
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Gif | ImageFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img,
    };

    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .map_err(|e| ProcessingError::Encode(e.to_string()))?;
    Ok(buffer)
}
