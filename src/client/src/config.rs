//! Client configuration loading and validation

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete client configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSection {
    /// Base URL of the task API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSection {
    /// File holding the persisted token and user record
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

// Default value functions
fn default_base_url() -> String { "http://localhost:3000".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_session_path() -> PathBuf { PathBuf::from(".taskboard/session.json") }

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::Config(format!(
                "failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ClientError::Config(format!("failed to parse configuration: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ClientError::Config("api.base_url must not be empty".to_string()));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::Config("api.timeout_secs must be positive".to_string()));
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim().trim_end_matches('/')
    }
}
