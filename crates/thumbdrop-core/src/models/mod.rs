//! Domain models

pub mod artifact;
pub mod responses;
pub mod upload;

pub use artifact::{DerivedArtifact, PublicBase};
pub use responses::{ArchiveUploadResponse, FileUploadResponse, ImageUploadResponse};
pub use upload::{ImageMetadata, ThumbnailSpec, UploadedFile};
