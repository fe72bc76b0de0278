//! Configuration module for Wren

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
///
/// Holds the consumer (application) key pair and the service endpoints.
/// Access tokens are deliberately absent: they live only in memory for
/// the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth consumer key
    #[serde(default)]
    pub consumer_key: String,

    /// OAuth consumer secret
    #[serde(default)]
    pub consumer_secret: String,

    /// Base URL for the OAuth and status endpoints
    #[serde(default = "default_api_base")]
    pub api_base_url: String,

    /// Base URL for the media upload endpoint
    #[serde(default = "default_upload_base")]
    pub upload_base_url: String,
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

fn default_upload_base() -> String {
    "https://upload.twitter.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            api_base_url: default_api_base(),
            upload_base_url: default_upload_base(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("wren");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default path or create default, then apply
    /// environment overrides (`WREN_CONSUMER_KEY`, `WREN_CONSUMER_SECRET`)
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("WREN_CONSUMER_KEY") {
            self.consumer_key = key;
        }
        if let Ok(secret) = std::env::var("WREN_CONSUMER_SECRET") {
            self.consumer_secret = secret;
        }
    }

    /// Whether a consumer key pair is present at all
    pub fn has_consumer_keys(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }
}
