//! Client configuration (`config.toml` plus environment overrides).

use crate::storage::AtomicTomlFile;
use genlearn_core::{GenlearnError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_URL: &str = "GENLEARN_API_URL";
pub const ENV_API_KEY: &str = "GENLEARN_API_KEY";
pub const ENV_LOG: &str = "GENLEARN_LOG";

/// Connection and logging settings for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix.
    pub api_base_url: String,
    /// Static application key sent as `X-API-Key`.
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `path` (defaults when missing) and applies `GENLEARN_*`
    /// environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = AtomicTomlFile::<ClientConfig>::new(path.to_path_buf())
            .load()?
            .unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        debug!(api = %config.api_base_url, "Client configuration loaded");
        Ok(config)
    }

    /// Applies overrides from `lookup`. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(level) = get(ENV_LOG) {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(GenlearnError::config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(GenlearnError::config("request_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
