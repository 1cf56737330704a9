//! Connection settings for the remote instance
//!
//! Loaded from `config.toml` in the config directory, then overridden by
//! `ENVSYNC_URL` and `ENVSYNC_TOKEN` when set.
//!
//! ```toml
//! instance_url = "https://deploy.example.com"
//! token = "1|abcdef..."
//! timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::paths;

/// Environment variable overriding `instance_url`
pub const ENV_URL: &str = "ENVSYNC_URL";

/// Environment variable overriding `token`
pub const ENV_TOKEN: &str = "ENVSYNC_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub instance_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Validated settings needed to reach the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl Config {
    /// Load config from the default location plus environment overrides
    pub fn load() -> Result<Self> {
        let path = paths::config_file()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a file, or return default if file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.is_empty()) {
            log::debug!("Using instance URL from {ENV_URL}");
            self.instance_url = Some(url);
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            log::debug!("Using token from {ENV_TOKEN}");
            self.token = Some(token);
        }
    }

    /// Resolve into connection settings, failing on missing values
    pub fn connection(&self) -> Result<Connection> {
        let base_url = self
            .instance_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .with_context(|| format!("No instance URL configured (set instance_url or {ENV_URL})"))?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("Instance URL must start with http:// or https://: {base_url}");
        }

        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .with_context(|| format!("No API token configured (set token or {ENV_TOKEN})"))?;

        Ok(Connection {
            base_url: base_url.to_string(),
            token: token.to_string(),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}
