//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which covers the service origin, the token store backend, and the last
//! username used to log in.
//!
//! Configuration is stored at `~/.config/anteroom/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "anteroom";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the service origin
const BASE_URL_ENV: &str = "ANTEROOM_BASE_URL";

/// Service origin used when neither the environment nor the config names one
pub const DEFAULT_BASE_URL: &str = "https://api.anteroom.app";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub token_store: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
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

    /// Resolve the service origin: environment override, then config,
    /// then the built-in default.
    pub fn resolve_base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory the file-backed token store lives in.
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_falls_back_to_default() {
        let config = Config::default();
        assert_eq!(config.resolve_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_base_url_wins_over_default() {
        let config = Config {
            base_url: Some("http://localhost:8000".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_base_url(), "http://localhost:8000");
    }
}
