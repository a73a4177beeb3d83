//! Common utilities for file upload handlers

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use thumbdrop_core::constants::DEFAULT_CONTENT_TYPE;
use thumbdrop_core::models::UploadedFile;
use thumbdrop_core::validation::sanitize_filename;
use thumbdrop_core::AppError;
use thumbdrop_processing::TransportFilter;

/// A file part accepted from a multipart body, not yet stored.
#[derive(Debug)]
pub struct ReceivedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read the file sent in `field_name`.
///
/// Other fields are drained and ignored. Returns `None` when the field is absent,
/// carries no filename, or declares a type the transport filter rejects. Sending
/// the field twice is an error.
pub async fn extract_upload_field(
    mut multipart: Multipart,
    field_name: &str,
    filter: &TransportFilter,
) -> Result<Option<ReceivedFile>, AppError> {
    let mut received: Option<ReceivedFile> = None;
    let mut seen = false;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(field_name) {
            continue;
        }

        if seen {
            return Err(AppError::InvalidInput(format!(
                "Multiple files are not allowed; send exactly one field named '{}'",
                field_name
            )));
        }
        seen = true;

        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                tracing::debug!(field = %field_name, "Field has no filename, ignoring");
                continue;
            }
        };
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        if !filter.accepts(&content_type) {
            tracing::debug!(
                field = %field_name,
                content_type = %content_type,
                "Content type rejected by transport filter"
            );
            continue;
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        received = Some(ReceivedFile {
            file_name,
            content_type,
            data,
        });
    }

    Ok(received)
}

/// Write a received file to storage under a freshly derived stored name.
pub async fn store_upload(state: &AppState, file: ReceivedFile) -> Result<UploadedFile, HttpAppError> {
    let name = if state.config.sanitize_filenames() {
        sanitize_filename(&file.file_name)
    } else {
        file.file_name.clone()
    };

    let stored_name = state.naming.name(&name, state.clock.now_millis());
    let size_bytes = file.data.len() as u64;

    state.storage.write(&stored_name, file.data.to_vec()).await?;

    tracing::info!(
        original_name = %file.file_name,
        stored_name = %stored_name,
        content_type = %file.content_type,
        size_bytes,
        "Upload stored"
    );

    Ok(UploadedFile {
        original_name: file.file_name,
        stored_path: stored_name.clone(),
        stored_name,
        declared_mime_type: file.content_type,
        size_bytes,
    })
}
