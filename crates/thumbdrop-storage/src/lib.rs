//! Thumbdrop Storage Library
//!
//! This crate provides the `Storage` trait and its local-filesystem and in-memory
//! implementations.
//!
//! # Storage key format
//!
//! Keys are relative, `/`-separated paths under the storage root, e.g.
//! `1700000000000-cat.png` or `1700000000000-album/a.jpg`. Keys must not contain a
//! `..` segment or a leading `/`; every backend rejects them with `InvalidKey`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use thumbdrop_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
