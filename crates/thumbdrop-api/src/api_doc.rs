//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use thumbdrop_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Thumbdrop API",
        version = "0.1.0",
        description = "Upload images or zip archives of images, receive public URLs for the stored files and for 32px/64px thumbnails."
    ),
    paths(
        handlers::upload_single::upload_single,
        handlers::upload_single_or_zip::upload_single_or_zip,
        handlers::uploads::serve_upload,
        handlers::health::health_check,
    ),
    components(schemas(
        models::ImageUploadResponse,
        models::FileUploadResponse,
        models::ArchiveUploadResponse,
        handlers::health::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Upload and serve files"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_upload_paths() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/uploadSingle"));
        assert!(spec.paths.paths.contains_key("/uploadSingleOrZip"));
        assert!(spec.paths.paths.contains_key("/uploads/{path}"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
