//! Test helpers: build AppState and router for integration tests.
//!
//! Every test app runs on in-memory storage with a clock pinned to `TEST_NOW_MILLIS`,
//! so stored names are predictable.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use std::sync::Arc;
use thumbdrop_api::setup::routes;
use thumbdrop_api::state::AppState;
use thumbdrop_core::{Config, FixedClock, NamingPolicy, StorageBackend, TimestampNaming};
use thumbdrop_storage::MemoryStorage;

pub const TEST_NOW_MILLIS: i64 = 1_700_000_000_000;
pub const TEST_ORIGIN: &str = "http://localhost:3001";

/// Test application: server plus a handle on the storage behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Public URL of a storage key as returned by the API.
    pub fn url(&self, key: &str) -> String {
        format!("{}/uploads/{}", TEST_ORIGIN, key)
    }

    /// Stored name the pinned clock gives `name`.
    pub fn stored(&self, name: &str) -> String {
        format!("{}-{}", TEST_NOW_MILLIS, name)
    }
}

pub fn test_config() -> Config {
    Config {
        storage_backend: StorageBackend::Memory,
        public_base_url: Some(TEST_ORIGIN.to_string()),
        ..Config::default()
    }
}

/// Setup test app with in-memory storage and timestamp naming.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(), Arc::new(TimestampNaming))
}

pub fn setup_test_app_with(config: Config, naming: Arc<dyn NamingPolicy>) -> TestApp {
    let storage = MemoryStorage::new();
    let state = Arc::new(AppState::with_parts(
        config.clone(),
        Arc::new(storage.clone()),
        naming,
        Arc::new(FixedClock(TEST_NOW_MILLIS)),
    ));
    let router = routes::setup_routes(&config, state);
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}
