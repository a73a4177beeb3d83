//! Thumbdrop Processing Library
//!
//! The file-handling pipeline behind the upload endpoints:
//! - Type validation of declared mime types and archive entry names (validator)
//! - Image probing and fixed-width thumbnail generation (image)
//! - Extraction of image entries from zip archives (archive)

#[cfg(feature = "archive")]
pub mod archive;
pub mod error;
#[cfg(feature = "image")]
pub mod image;
pub mod validator;

#[cfg(feature = "archive")]
pub use archive::{ArchiveEntry, ArchiveExtractor};
pub use error::{ProcessingError, ProcessingResult};
#[cfg(feature = "image")]
pub use image::{probe, ThumbnailGenerator};
pub use validator::{content_type_for_path, is_image_entry, Classification, TransportFilter, UploadKind};
