//! Configuration management for the SusuPay client.
//!
//! Loads configuration from ${SUSU_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the SusuPay API (scheme + host, no trailing slash).
    pub api_base_url: String,

    /// Upper bound for a single token refresh call, in seconds.
    ///
    /// A refresh that exceeds this is treated as a refresh failure so
    /// requests queued behind it are never starved.
    pub refresh_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            refresh_timeout_secs: Self::DEFAULT_REFRESH_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };

        // SUSU_API_URL overrides the config file, matching the original
        // deployment knob.
        if let Ok(url) = std::env::var("SUSU_API_URL") {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                config.api_base_url = trimmed.to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Writes a default config file if none exists.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created.
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }

    /// Returns the refresh timeout as a [`Duration`].
    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api_base_url))?;
        Ok(())
    }
}

pub mod paths {
    //! Path resolution for SusuPay client configuration and data.
    //!
    //! SUSU_HOME resolution order:
    //! 1. SUSU_HOME environment variable (if set)
    //! 2. ~/.config/susu (default)

    use std::path::PathBuf;

    /// Returns the susu home directory.
    ///
    /// Checks SUSU_HOME env var first, falls back to ~/.config/susu
    pub fn susu_home() -> PathBuf {
        if let Ok(home) = std::env::var("SUSU_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("susu"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        susu_home().join("config.toml")
    }

    /// Returns the path to the persisted credential file.
    pub fn tokens_path() -> PathBuf {
        susu_home().join("tokens.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: defaults are applied when no config file exists.
    #[test]
    fn test_defaults_without_file() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.refresh_timeout_secs, 30);
    }

    /// Test: partial config files fall back to defaults for missing fields.
    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"https://susu.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "https://susu.example.com");
        assert_eq!(config.refresh_timeout_secs, 30);
    }

    /// Test: malformed base URLs are rejected at load time.
    #[test]
    fn test_invalid_base_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"not a url\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    /// Test: init writes a parseable default file and is idempotent.
    #[test]
    fn test_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(Config::init(&path).unwrap());
        assert!(!Config::init(&path).unwrap());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.refresh_timeout_secs, 30);
    }
}
