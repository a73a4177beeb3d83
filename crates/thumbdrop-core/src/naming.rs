//! Stored-name derivation
//!
//! Every stored file (original upload, archive entry, thumbnail) gets its name here.
//! The policy is pluggable; the timestamp policy reproduces the historical
//! `{millis}-{original}` layout, including its same-millisecond collisions.

use std::sync::Arc;

use crate::config::NamingStrategy;

/// Source of the upload timestamp.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Derives a stored filename from an original filename and upload time.
pub trait NamingPolicy: Send + Sync {
    fn name(&self, original_filename: &str, now_millis: i64) -> String;
}

/// `{now_millis}-{original}`. No collision detection beyond timestamp granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampNaming;

impl NamingPolicy for TimestampNaming {
    fn name(&self, original_filename: &str, now_millis: i64) -> String {
        format!("{}-{}", now_millis, original_filename)
    }
}

/// `{now_millis}-{8 hex}-{original}`, with the suffix taken from a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuffixNaming;

impl NamingPolicy for RandomSuffixNaming {
    fn name(&self, original_filename: &str, now_millis: i64) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}", now_millis, &suffix[..8], original_filename)
    }
}

pub fn naming_policy_for(strategy: NamingStrategy) -> Arc<dyn NamingPolicy> {
    match strategy {
        NamingStrategy::Timestamp => Arc::new(TimestampNaming),
        NamingStrategy::Random => Arc::new(RandomSuffixNaming),
    }
}

/// Name of the thumbnail of `stored_name` at `width` pixels: `thumb{width}-{stored_name}`.
pub fn thumbnail_name(width: u32, stored_name: &str) -> String {
    format!("thumb{}-{}", width, stored_name)
}
