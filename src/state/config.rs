//! Application configuration with persistence.
//!
//! This module provides the [`AppConfig`] structure holding the transaction
//! API endpoint and the signed-in user, with load/save to disk.
//!
//! # Configuration File Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/wallet-sync/config.json`
//! - macOS: `~/Library/Application Support/wallet-sync/config.json`
//! - Windows: `%APPDATA%/wallet-sync/config.json`
//!
//! # Example
//!
//! ```ignore
//! use wallet_sync::state::AppConfig;
//!
//! let mut config = AppConfig::load();
//! config.user_id = Some("user_123".to_string());
//! config.save()?;
//! let http = config.http_config();
//! ```

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::HttpConfig;
use crate::client::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
const APP_NAME: &str = "wallet-sync";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// AppConfig
// ============================================================================

/// Application configuration structure for persistence.
///
/// Missing fields fall back to their defaults, so older files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the transaction API.
    pub api_base_url: String,
    /// Identifier handed out by the session provider for the signed-in user.
    pub user_id: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            user_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from disk.
    ///
    /// If the configuration file doesn't exist or cannot be parsed,
    /// returns the default configuration.
    #[must_use]
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!("Config load failed, using defaults: {err:#}");
                Self::default()
            }
        }
    }

    /// Loads the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to its default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves the configuration to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Builds the HTTP configuration injected into the API client.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.api_base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

// ============================================================================
// Tests
// ============================================================================
