use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use thumbdrop_core::constants::SINGLE_OR_ZIP_FIELD;
use thumbdrop_core::models::responses::{FILES_UPLOADED_MESSAGE, FILE_UPLOADED_MESSAGE};
use thumbdrop_core::models::{ArchiveUploadResponse, FileUploadResponse};
use thumbdrop_core::AppError;
use thumbdrop_processing::UploadKind;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::public_url::public_base;
use crate::utils::upload::{extract_upload_field, store_upload};

const MISSING_FILE_MESSAGE: &str = "Invalid file";

/// Upload one image or a zip of images
///
/// Images are stored as-is (200, no thumbnails). Zip archives are stored and
/// their `.jpg`/`.jpeg`/`.png` entries extracted (201, possibly no links).
/// Any other accepted type is stored but answered with 400.
#[utoipa::path(
    post,
    path = "/uploadSingleOrZip",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded", body = FileUploadResponse),
        (status = 201, description = "Archive extracted", body = ArchiveUploadResponse),
        (status = 400, description = "Missing or unsupported file", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Archive could not be opened", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, headers, uri, multipart),
    fields(operation = "upload_single_or_zip")
)]
pub async fn upload_single_or_zip(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let base = public_base(&state.config, &headers, &uri);

    let file = extract_upload_field(multipart, SINGLE_OR_ZIP_FIELD, &state.transport_filter)
        .await?
        .ok_or_else(|| AppError::MissingFile(MISSING_FILE_MESSAGE.to_string()))?;

    let uploaded = store_upload(&state, file).await?;

    match UploadKind::from_mime(&uploaded.declared_mime_type) {
        UploadKind::Image => {
            let file_url = base.artifact(&uploaded.stored_path).url;
            tracing::info!(file_url = %file_url, "Single image uploaded");
            Ok((
                StatusCode::OK,
                Json(FileUploadResponse {
                    message: FILE_UPLOADED_MESSAGE.to_string(),
                    file_url,
                }),
            )
                .into_response())
        }
        UploadKind::Archive => {
            let artifacts = state
                .archive_extractor()
                .extract(&uploaded.stored_path, &base)
                .await
                .map_err(|e| AppError::ArchiveExtraction(e.to_string()))?;

            Ok((
                StatusCode::CREATED,
                Json(ArchiveUploadResponse {
                    message: FILES_UPLOADED_MESSAGE.to_string(),
                    image_links: artifacts.into_iter().map(|a| a.url).collect(),
                }),
            )
                .into_response())
        }
        UploadKind::Unsupported => {
            Err(AppError::UnsupportedType(uploaded.declared_mime_type).into())
        }
    }
}
