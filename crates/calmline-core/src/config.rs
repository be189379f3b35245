//! Client configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! includes the backend base URL, request timeouts, and where the session
//! token is persisted.
//!
//! Configuration is stored at `~/.config/calmline/config.json`. The base URL
//! can be overridden with the `CALMLINE_API_URL` environment variable.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStore, KeyringTokenStore, TokenStore};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "calmline";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "CALMLINE_API_URL";

/// Local development backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// Chat runs retrieval and generation server-side, so it gets longer.
const DEFAULT_CHAT_TIMEOUT_MS: u64 = 30_000;

/// Where the session token lives between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_ms: u64,
    pub chat_timeout_ms: u64,
    pub token_store: TokenStoreKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            chat_timeout_ms: DEFAULT_CHAT_TIMEOUT_MS,
            token_store: TokenStoreKind::default(),
        }
    }
}

impl Config {
    /// Load the config file (or defaults), then apply `CALMLINE_API_URL`.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Some(url) = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            config.api_base_url = Some(url);
        }
        Ok(config)
    }

    /// Read a config file, defaulting when it does not exist.
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Config pointing at a specific backend, other settings defaulted.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: Some(base_url.to_string()),
            ..Self::default()
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Base URL without a trailing slash, falling back to the local
    /// development backend.
    pub fn base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_millis(self.chat_timeout_ms)
    }

    /// Build the configured token store.
    pub fn token_store(&self) -> Result<Arc<dyn TokenStore>> {
        let store: Arc<dyn TokenStore> = match self.token_store {
            TokenStoreKind::File => Arc::new(FileTokenStore::new(self.cache_dir()?)),
            TokenStoreKind::Keyring => Arc::new(KeyringTokenStore),
        };
        Ok(store)
    }
}
