//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base address, the last used username and the
//! token storage backend.
//!
//! Configuration is stored at `~/.config/positions-tui/config.json`. The
//! `POSITIONS_API_BASE` environment variable (also read from `.env` by the
//! binary) overrides the configured base address.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStore, KeyringTokenStore, TokenStore};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "positions-tui";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the API base address
pub const API_BASE_ENV: &str = "POSITIONS_API_BASE";

/// Base address used when neither the environment nor the config sets one
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Where the bearer token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base: Option<String>,
    pub last_username: Option<String>,
    #[serde(default)]
    pub token_backend: TokenBackend,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
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

    /// The API base address in effect for this process
    pub fn api_base(&self) -> String {
        resolve_api_base(std::env::var(API_BASE_ENV).ok(), self.api_base.as_deref())
    }

    /// Open the configured token store backend
    pub fn open_token_store(&self) -> Result<Arc<dyn TokenStore>> {
        Ok(match self.token_backend {
            TokenBackend::File => Arc::new(FileTokenStore::new(self.cache_dir()?)),
            TokenBackend::Keyring => Arc::new(KeyringTokenStore::default()),
        })
    }
}

/// Pick the base address: environment first, then config, then the default.
/// Blank values are skipped and trailing slashes removed.
pub fn resolve_api_base(env: Option<String>, configured: Option<&str>) -> String {
    fn non_blank(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|s| !s.is_empty())
    }

    non_blank(env.as_deref())
        .or_else(|| non_blank(configured))
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}
