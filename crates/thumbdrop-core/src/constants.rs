//! Fixed values of the upload pipeline.

/// Thumbnail target widths, in generation order.
pub const THUMBNAIL_WIDTHS: [u32; 2] = [32, 64];

/// Both source dimensions must reach this size before thumbnails are derived.
pub const THUMBNAIL_MIN_SOURCE_PX: u32 = 128;

/// URL path segment under which stored files are served.
pub const UPLOADS_PATH: &str = "uploads";

/// Multipart field read by `POST /uploadSingle`.
pub const SINGLE_IMAGE_FIELD: &str = "picture";

/// Multipart field read by `POST /uploadSingleOrZip`.
pub const SINGLE_OR_ZIP_FIELD: &str = "file";

/// Content type assumed when a multipart part does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Mime types accepted by the transport filter.
pub const ACCEPTED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "application/zip",
    "application/x-zip-compressed",
    "application/octet-stream",
];
