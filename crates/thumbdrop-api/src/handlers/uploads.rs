use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thumbdrop_core::validation::is_safe_key;
use thumbdrop_core::AppError;
use thumbdrop_processing::content_type_for_path;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Serve a stored file
#[utoipa::path(
    get,
    path = "/uploads/{path}",
    tag = "uploads",
    params(
        ("path" = String, Path, description = "Storage path of the file, may contain '/'")
    ),
    responses(
        (status = 200, description = "Raw file bytes, content type by extension"),
        (status = 400, description = "Path escapes the storage root", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, HttpAppError> {
    if !is_safe_key(&path) {
        return Err(AppError::InvalidInput("Invalid file path".to_string()).into());
    }

    let data = state.storage.read(&path).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for_path(&path))],
        data,
    )
        .into_response())
}
