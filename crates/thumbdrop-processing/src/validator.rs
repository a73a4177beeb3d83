//! Upload type validation
//!
//! Two gates with different strictness: the transport filter decides whether a
//! multipart part is accepted at all, the upload kind decides what a handler does
//! with an accepted file.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thumbdrop_core::constants::{ACCEPTED_MIME_TYPES, DEFAULT_CONTENT_TYPE};

static IMAGE_ENTRY_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png)$"));

/// Outcome of the transport filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected,
}

/// Permissive allow-list applied while a multipart part is received.
#[derive(Debug, Clone)]
pub struct TransportFilter {
    accepted: Vec<String>,
}

impl Default for TransportFilter {
    fn default() -> Self {
        Self::new(ACCEPTED_MIME_TYPES.iter().map(|m| m.to_string()).collect())
    }
}

impl TransportFilter {
    pub fn new(accepted: Vec<String>) -> Self {
        Self {
            accepted: accepted.iter().map(|m| normalize_mime(m)).collect(),
        }
    }

    pub fn classify(&self, declared_mime_type: &str) -> Classification {
        let normalized = normalize_mime(declared_mime_type);
        if self.accepted.iter().any(|m| *m == normalized) {
            Classification::Accepted
        } else {
            Classification::Rejected
        }
    }

    pub fn accepts(&self, declared_mime_type: &str) -> bool {
        self.classify(declared_mime_type) == Classification::Accepted
    }
}

/// What a handler does with an accepted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Archive,
    Unsupported,
}

impl UploadKind {
    /// `image/*` is an image, anything mentioning `zip` is an archive.
    pub fn from_mime(declared_mime_type: &str) -> Self {
        let normalized = normalize_mime(declared_mime_type);
        if normalized.starts_with("image/") {
            UploadKind::Image
        } else if normalized.contains("zip") {
            UploadKind::Archive
        } else {
            UploadKind::Unsupported
        }
    }
}

/// Lowercased mime type without parameters: `Image/PNG; q=1` becomes `image/png`.
pub fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or(mime)
        .trim()
        .to_lowercase()
}

/// Whether an archive entry name looks like a supported image (`.jpg`, `.jpeg`, `.png`, any case).
pub fn is_image_entry(entry_name: &str) -> bool {
    match &*IMAGE_ENTRY_PATTERN {
        Ok(pattern) => pattern.is_match(entry_name),
        Err(e) => {
            tracing::error!(error = %e, "Image entry pattern failed to compile");
            false
        }
    }
}

/// Content type served for a stored file, by extension.
pub fn content_type_for_path(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("zip") => "application/zip",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
