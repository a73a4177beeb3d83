use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use thumbdrop_core::constants::SINGLE_IMAGE_FIELD;
use thumbdrop_core::models::responses::FILE_UPLOADED_MESSAGE;
use thumbdrop_core::models::ImageUploadResponse;
use thumbdrop_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::public_url::public_base;
use crate::utils::upload::{extract_upload_field, store_upload};

const MISSING_FILE_MESSAGE: &str = "Invalid image file";

/// Upload one image and derive its thumbnails
///
/// The file in field `picture` is stored first. Sources of at least 128x128 get
/// 32px and 64px wide thumbnails; smaller ones are returned as their own thumbnail.
/// A thumbnail failure is reported as 500 even though the original stays stored.
#[utoipa::path(
    post,
    path = "/uploadSingle",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = ImageUploadResponse),
        (status = 400, description = "No acceptable file in field 'picture'", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Thumbnail generation failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, uri, multipart), fields(operation = "upload_single"))]
pub async fn upload_single(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let base = public_base(&state.config, &headers, &uri);

    let file = extract_upload_field(multipart, SINGLE_IMAGE_FIELD, &state.transport_filter)
        .await?
        .ok_or_else(|| AppError::MissingFile(MISSING_FILE_MESSAGE.to_string()))?;

    let uploaded = store_upload(&state, file).await?;
    let file_url = base.artifact(&uploaded.stored_path).url;

    let thumbnails = state
        .thumbnail_generator()
        .generate(&uploaded.stored_path, &base)
        .await
        .map_err(|e| AppError::ThumbnailGeneration(e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ImageUploadResponse {
            message: FILE_UPLOADED_MESSAGE.to_string(),
            file_url,
            thumbnails: thumbnails.into_iter().map(|a| a.url).collect(),
        }),
    )
        .into_response())
}
