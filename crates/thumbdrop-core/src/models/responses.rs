//! JSON bodies returned by the upload endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const FILE_UPLOADED_MESSAGE: &str = "File uploaded successfully";
pub const FILES_UPLOADED_MESSAGE: &str = "Files uploaded successfully";

/// `POST /uploadSingle` success body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub message: String,
    pub file_url: String,
    /// Two thumbnail URLs (32px, then 64px), or the original's URL for small images.
    pub thumbnails: Vec<String>,
}

/// `POST /uploadSingleOrZip` body for a single image.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub message: String,
    pub file_url: String,
}

/// `POST /uploadSingleOrZip` body for an archive. `image_links` may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveUploadResponse {
    pub message: String,
    pub image_links: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_names() {
        let body = serde_json::to_value(ImageUploadResponse {
            message: FILE_UPLOADED_MESSAGE.to_string(),
            file_url: "u".to_string(),
            thumbnails: vec!["u".to_string()],
        })
        .unwrap();
        assert!(body.get("fileUrl").is_some());
        assert!(body.get("thumbnails").is_some());

        let body = serde_json::to_value(ArchiveUploadResponse {
            message: FILES_UPLOADED_MESSAGE.to_string(),
            image_links: vec![],
        })
        .unwrap();
        assert_eq!(body["imageLinks"], serde_json::json!([]));
    }
}
