use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://structures-production.up.railway.app";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("refusing non-HTTPS API base URL: {0}")]
    InsecureBaseUrl(String),
    #[error("no config directory available; set STRUCTURES_SESSION_FILE")]
    NoSessionPath,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout: Duration,
    pub session_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = validate_base_url(
            &get("STRUCTURES_API_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let log_level = get("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let request_timeout = Duration::from_millis(
            get("STRUCTURES_TIMEOUT_MS")
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        );

        let session_path = match get("STRUCTURES_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .map(|dir| dir.join("structures").join("session.json"))
                .ok_or(ConfigError::NoSessionPath)?,
        };

        Ok(Self {
            api_base_url,
            log_level,
            request_timeout,
            session_path,
        })
    }

    pub fn with_api_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = validate_base_url(url)?;
        Ok(self)
    }
}

/// Plain HTTP is accepted only for loopback development servers. The returned
/// URL has no trailing slash.
pub fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "https" => {}
        "http" if url.host_str().is_some_and(|h| LOOPBACK_HOSTS.contains(&h)) => {}
        "http" => return Err(ConfigError::InsecureBaseUrl(trimmed.to_string())),
        other => {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme {other}"),
            })
        }
    }

    Ok(trimmed.to_string())
}
