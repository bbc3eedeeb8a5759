//! Application configuration management.
//!
//! Configuration is stored at `~/.config/quill-tui/config.json`. The API
//! base URL is fixed at process start: the `QUILL_API_URL` environment
//! variable wins over the config file, which wins over the default.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "quill-tui";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API base path (local development server)
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
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

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted token and the log file.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Base URL for the member API.
    pub fn api_base_url(&self) -> String {
        Self::resolve_base_url(std::env::var("QUILL_API_URL").ok(), self)
    }

    fn resolve_base_url(env_override: Option<String>, config: &Config) -> String {
        env_override
            .filter(|v| !v.is_empty())
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_url_prefers_env() {
        let config = Config {
            api_base_url: Some("https://config.example.org/api".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Config::resolve_base_url(Some("https://env.example.org/api".to_string()), &config),
            "https://env.example.org/api"
        );
    }

    #[test]
    fn test_resolve_base_url_ignores_empty_env() {
        let config = Config {
            api_base_url: Some("https://config.example.org/api".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Config::resolve_base_url(Some(String::new()), &config),
            "https://config.example.org/api"
        );
    }

    #[test]
    fn test_resolve_base_url_default() {
        let config = Config::default();
        assert_eq!(
            Config::resolve_base_url(None, &config),
            DEFAULT_API_BASE_URL
        );
    }
}
