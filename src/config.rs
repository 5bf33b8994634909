//! Configuration handling for the console.
//!
//! Configuration is stored in `config.yaml` under the user's config
//! directory and includes:
//! - The CRM backend base URL
//! - The fixed page size used by list views

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, RolodexError};

/// Default page size for every collection view, matching the backend's
/// expectations.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Quiet period for search input, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the CRM backend, e.g. `https://crm.example.com/api`
    pub api_url: String,

    /// Page size for collection requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Directory holding `config.yaml` and `session.yaml`.
    ///
    /// `ROLODEX_CONFIG_DIR` overrides the platform default so tests and
    /// scripts can run against an isolated directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var("ROLODEX_CONFIG_DIR")
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        ProjectDirs::from("", "", "rolodex")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| RolodexError::Config("cannot determine config directory".to_string()))
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Base URL from config or the `ROLODEX_API_URL` environment variable,
    /// validated and stripped of any trailing slash.
    pub fn base_url(&self) -> Result<Url> {
        let raw = match env::var("ROLODEX_API_URL") {
            Ok(value) if !value.is_empty() => value,
            _ => self.api_url.clone(),
        };

        let trimmed = raw.trim_end_matches('/');
        Url::parse(trimmed).map_err(|_| RolodexError::InvalidBaseUrl(raw))
    }

    /// Set the backend base URL
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        Url::parse(url.trim_end_matches('/'))
            .map_err(|_| RolodexError::InvalidBaseUrl(url.to_string()))?;
        self.api_url = url.trim_end_matches('/').to_string();
        Ok(())
    }
}
