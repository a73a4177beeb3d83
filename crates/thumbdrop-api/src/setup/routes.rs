//! Route configuration and setup

use crate::api_doc::get_openapi_spec;
use crate::handlers;
use crate::middleware::error_details_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use thumbdrop_core::Config;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    tracing::debug!(
        max_upload_size_bytes = config.max_upload_size_bytes(),
        "Request body limit configured"
    );

    Router::new()
        .route(
            "/uploadSingle",
            post(handlers::upload_single::upload_single),
        )
        .route(
            "/uploadSingleOrZip",
            post(handlers::upload_single_or_zip::upload_single_or_zip),
        )
        .route("/uploads/{*path}", get(handlers::uploads::serve_upload))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(get_openapi_spec()) }),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            error_details_middleware,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
