//! Configuration module
//!
//! Server, storage, naming and logging settings, read from the environment
//! (with `.env` support) and validated once at startup.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 3001;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const UPLOAD_DIR: &str = "./uploads";

/// How stored filenames are derived from the original filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStrategy {
    /// `{millis}-{original}`; two uploads of one name in the same millisecond collide.
    Timestamp,
    /// `{millis}-{8 hex}-{original}`.
    Random,
}

impl FromStr for NamingStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "timestamp" | "legacy" => Ok(NamingStrategy::Timestamp),
            "random" => Ok(NamingStrategy::Random),
            _ => Err(anyhow::anyhow!("Invalid naming strategy: {}", s)),
        }
    }
}

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub storage_backend: StorageBackend,
    pub upload_dir: String,
    /// Overrides the request's scheme and host when building artifact URLs.
    pub public_base_url: Option<String>,
    pub trust_forwarded_proto: bool,
    pub max_upload_size_bytes: usize,
    pub naming_strategy: NamingStrategy,
    pub sanitize_filenames: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            storage_backend: StorageBackend::Local,
            upload_dir: UPLOAD_DIR.to_string(),
            public_base_url: None,
            trust_forwarded_proto: false,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            naming_strategy: NamingStrategy::Timestamp,
            sanitize_filenames: true,
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup. Unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let server_port = match lookup("SERVER_PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT '{}': {}", v, e))?,
            None => defaults.server_port,
        };

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or(defaults.environment);

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(v) => v.parse::<StorageBackend>()?,
            None => defaults.storage_backend,
        };

        let upload_dir = lookup("UPLOAD_DIR").unwrap_or(defaults.upload_dir);

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let max_upload_size_mb = match lookup("MAX_UPLOAD_SIZE_MB") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("Invalid MAX_UPLOAD_SIZE_MB '{}': {}", v, e))?,
            None => MAX_UPLOAD_SIZE_MB,
        };
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", max_upload_size_mb)
            })?;

        let naming_strategy = match lookup("NAMING_STRATEGY") {
            Some(v) => v.parse::<NamingStrategy>()?,
            None => defaults.naming_strategy,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>()?,
            None => defaults.log_format,
        };

        Ok(Config {
            server_port,
            environment,
            storage_backend,
            upload_dir,
            public_base_url,
            trust_forwarded_proto: parse_bool(lookup("TRUST_FORWARDED_PROTO"), false),
            max_upload_size_bytes,
            naming_strategy,
            sanitize_filenames: parse_bool(lookup("SANITIZE_FILENAMES"), true),
            log_format,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.storage_backend == StorageBackend::Local && self.upload_dir.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_DIR must be set when using the local storage backend"
            ));
        }

        if let Some(url) = &self.public_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "PUBLIC_BASE_URL must start with http:// or https:// (got '{}')",
                    url
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }

    pub fn trust_forwarded_proto(&self) -> bool {
        self.trust_forwarded_proto
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn naming_strategy(&self) -> NamingStrategy {
        self.naming_strategy
    }

    pub fn sanitize_filenames(&self) -> bool {
        self.sanitize_filenames
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 3001);
        assert_eq!(config.storage_backend(), StorageBackend::Local);
        assert_eq!(config.upload_dir(), "./uploads");
        assert_eq!(config.naming_strategy(), NamingStrategy::Timestamp);
        assert!(config.sanitize_filenames());
        assert!(!config.trust_forwarded_proto());
        assert_eq!(config.max_upload_size_bytes(), 50 * 1024 * 1024);
        assert!(config.public_base_url().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "8080"),
            ("STORAGE_BACKEND", "memory"),
            ("PUBLIC_BASE_URL", "https://cdn.example.com/"),
            ("NAMING_STRATEGY", "random"),
            ("SANITIZE_FILENAMES", "false"),
            ("MAX_UPLOAD_SIZE_MB", "5"),
            ("LOG_FORMAT", "json"),
            ("APP_ENV", "prod"),
        ])
        .unwrap();

        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.storage_backend(), StorageBackend::Memory);
        assert_eq!(config.public_base_url(), Some("https://cdn.example.com"));
        assert_eq!(config.naming_strategy(), NamingStrategy::Random);
        assert!(!config.sanitize_filenames());
        assert_eq!(config.max_upload_size_bytes(), 5 * 1024 * 1024);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_port_is_error() {
        assert!(config_from(&[("SERVER_PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_invalid_naming_strategy_is_error() {
        assert!(config_from(&[("NAMING_STRATEGY", "sha1")]).is_err());
    }

    #[test]
    fn test_invalid_max_upload_size_is_error() {
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "fifty")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "-1")]).is_err());
    }

    #[test]
    fn test_overflowing_max_upload_size_is_error() {
        let huge = usize::MAX.to_string();
        let err = config_from(&[("MAX_UPLOAD_SIZE_MB", huge.as_str())]).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_validate_rejects_bad_public_base_url() {
        let config = config_from(&[("PUBLIC_BASE_URL", "cdn.example.com")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_upload_dir() {
        let config = config_from(&[("UPLOAD_DIR", "  ")]).unwrap();
        assert!(config.validate().is_err());
    }
}
