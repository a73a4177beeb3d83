//! Public URL base for artifacts returned to clients.

use axum::http::{header, HeaderMap, Uri};
use thumbdrop_core::models::PublicBase;
use thumbdrop_core::Config;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// `PUBLIC_BASE_URL` when configured, otherwise the request's scheme and host.
pub fn public_base(config: &Config, headers: &HeaderMap, uri: &Uri) -> PublicBase {
    if let Some(base) = config.public_base_url() {
        return PublicBase::from_origin(base);
    }

    let scheme = if config.trust_forwarded_proto() {
        headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_lowercase())
            .filter(|v| v == "http" || v == "https")
            .unwrap_or_else(|| "http".to_string())
    } else {
        "http".to_string()
    };

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| format!("localhost:{}", config.server_port()));

    PublicBase::from_request_parts(&scheme, &host)
}
