use serde::{Deserialize, Serialize};

use crate::constants::UPLOADS_PATH;

/// A public reference to a stored file. Identity is the storage key behind the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedArtifact {
    pub url: String,
}

/// Base under which stored files are publicly reachable, e.g. `http://localhost:3001/uploads`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBase(String);

impl PublicBase {
    /// Base for files served by this process at `{origin}/uploads`.
    pub fn from_origin(origin: &str) -> Self {
        PublicBase(format!("{}/{}", origin.trim_end_matches('/'), UPLOADS_PATH))
    }

    /// Base for a scheme and host taken from a request.
    pub fn from_request_parts(scheme: &str, host: &str) -> Self {
        Self::from_origin(&format!("{}://{}", scheme, host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Artifact for a storage key.
    pub fn artifact(&self, key: &str) -> DerivedArtifact {
        DerivedArtifact {
            url: format!("{}/{}", self.0, key.trim_start_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_url_from_request() {
        let base = PublicBase::from_request_parts("http", "localhost:3001");
        assert_eq!(
            base.artifact("1-cat.png").url,
            "http://localhost:3001/uploads/1-cat.png"
        );
    }

    #[test]
    fn test_artifact_url_keeps_nested_keys() {
        let base = PublicBase::from_origin("https://cdn.example.com/");
        assert_eq!(
            base.artifact("1-album/a.jpg").url,
            "https://cdn.example.com/uploads/1-album/a.jpg"
        );
    }

    #[test]
    fn test_artifact_serializes_as_plain_url() {
        let artifact = PublicBase::from_origin("http://h").artifact("k.png");
        assert_eq!(
            serde_json::to_value(&artifact).unwrap(),
            serde_json::json!("http://h/uploads/k.png")
        );
    }
}
