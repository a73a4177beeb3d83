//! Image processing module
//!
//! - Header probing and full decoding (processor)
//! - Aspect-preserving width resize (resize)
//! - Thumbnail derivation and storage (thumbnail)

pub mod processor;
pub mod resize;
pub mod thumbnail;

pub use processor::{decode, probe};
pub use resize::ImageResize;
pub use thumbnail::ThumbnailGenerator;
