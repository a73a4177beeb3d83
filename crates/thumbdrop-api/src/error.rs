//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Any `AppError` (or a type that converts
//! into one) renders with its own status code and a JSON body carrying at least
//! `error`, `code` and `recoverable`. `details` and `error_type` are only added by
//! `middleware::error_details` when the configured environment is not production.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thumbdrop_core::{AppError, ErrorMetadata, LogLevel};
use thumbdrop_storage::StorageError;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from thumbdrop-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Unredacted body of an error response, carried in the response extensions.
///
/// Only attached for non-sensitive errors.
#[derive(Debug, Clone)]
pub struct DetailedErrorExtension(pub ErrorResponse);

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse {
            error: app_error.client_message(),
            details: None,
            error_type: None,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
        };

        let detailed = (!app_error.is_sensitive()).then(|| ErrorResponse {
            details: Some(app_error.detailed_message()),
            error_type: Some(app_error.error_type().to_string()),
            ..body.clone()
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(detailed) = detailed {
            response
                .extensions_mut()
                .insert(DetailedErrorExtension(detailed));
        }
        response
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(_) => AppError::NotFound("File not found".to_string()),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::WriteFailed(msg) => AppError::Storage(msg),
            StorageError::ReadFailed(msg) => AppError::Storage(msg),
            StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let HttpAppError(app_err) = StorageError::NotFound("1-a.png".to_string()).into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, "File not found"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_storage_error_invalid_key() {
        let HttpAppError(app_err) = StorageError::InvalidKey("Invalid key".to_string()).into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Invalid key"),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_storage_error_write_failed() {
        let HttpAppError(app_err) = StorageError::WriteFailed("disk full".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(_)));
        assert_eq!(app_err.http_status_code(), 500);
    }

    #[test]
    fn test_from_storage_error_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
        let HttpAppError(app_err) = StorageError::IoError(io_err).into();
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("IO error")),
            _ => panic!("Expected Internal variant"),
        }
    }

    #[test]
    fn test_error_response_status() {
        let response =
            HttpAppError(AppError::MissingFile("Invalid image file".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            HttpAppError(AppError::ThumbnailGeneration("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_carries_details_only_for_non_sensitive_errors() {
        let response =
            HttpAppError(AppError::MissingFile("Invalid image file".to_string())).into_response();
        let detailed = response
            .extensions()
            .get::<DetailedErrorExtension>()
            .expect("details attached");
        assert_eq!(detailed.0.error_type.as_deref(), Some("MissingFile"));
        assert!(detailed.0.details.is_some());

        let response = HttpAppError(AppError::Storage("disk full".to_string())).into_response();
        assert!(response.extensions().get::<DetailedErrorExtension>().is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Invalid image file".to_string(),
            details: None,
            error_type: None,
            code: "MISSING_FILE".to_string(),
            recoverable: false,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["error"], "Invalid image file");
        assert_eq!(json["code"], "MISSING_FILE");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("details").is_none());
    }
}
