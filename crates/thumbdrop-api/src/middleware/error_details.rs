//! Error detail exposure
//!
//! Error responses leave `HttpAppError` redacted. Outside production this layer
//! swaps in the detailed body (`details`, `error_type`) the error attached.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::DetailedErrorExtension;
use crate::state::AppState;

pub async fn error_details_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(DetailedErrorExtension(detailed)) =
        response.extensions_mut().remove::<DetailedErrorExtension>()
    else {
        return response;
    };

    if state.config.is_production() {
        return response;
    }

    (response.status(), Json(detailed)).into_response()
}
