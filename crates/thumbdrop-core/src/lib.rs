//! Thumbdrop Core Library
//!
//! This crate provides the domain models, error types, configuration, naming policy
//! and filename validation shared across all Thumbdrop components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, LogFormat, NamingStrategy};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use naming::{
    naming_policy_for, thumbnail_name, Clock, FixedClock, NamingPolicy, RandomSuffixNaming,
    SystemClock, TimestampNaming,
};
pub use storage_types::StorageBackend;
