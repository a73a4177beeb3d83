use serde::{Deserialize, Serialize};

use crate::constants::{THUMBNAIL_MIN_SOURCE_PX, THUMBNAIL_WIDTHS};

/// A file received from a multipart upload and written to storage.
///
/// `stored_name` is fixed at creation; `stored_path` is the storage key it was written under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub original_name: String,
    pub stored_name: String,
    pub stored_path: String,
    pub declared_mime_type: String,
    pub size_bytes: u64,
}

/// Pixel dimensions probed from an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width_px: u32,
    pub height_px: u32,
}

impl ImageMetadata {
    /// Whether the source is large enough for derived thumbnails.
    pub fn qualifies_for_thumbnails(&self) -> bool {
        self.width_px >= THUMBNAIL_MIN_SOURCE_PX && self.height_px >= THUMBNAIL_MIN_SOURCE_PX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSpec {
    pub target_width_px: u32,
}

impl ThumbnailSpec {
    /// The fixed thumbnail set, ascending.
    pub fn standard() -> Vec<ThumbnailSpec> {
        THUMBNAIL_WIDTHS
            .iter()
            .map(|&target_width_px| ThumbnailSpec { target_width_px })
            .collect()
    }
}
