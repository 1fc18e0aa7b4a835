//! Platform-specific directory management
//!
//! Provides the configuration directory following the XDG Base Directory
//! Specification on Linux and standard locations on macOS and Windows.
//!
//! The `IARCHAIN_CONFIG_DIR` environment variable overrides the default.

use std::env;
use std::path::PathBuf;

use crate::config::defaults::CONFIG_FILE_NAME;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "IARCHAIN_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "iarchain";

/// Platform-specific directory provider for iarchain
#[derive(Debug, Clone)]
pub struct IarchainDirs {
    config_dir: PathBuf,
}

impl IarchainDirs {
    /// Create a new `IarchainDirs` instance
    ///
    /// Checks the environment variable first, then falls back to the platform
    /// default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/iarchain` or `~/.config/iarchain`
    /// - macOS: `~/Library/Application Support/iarchain`
    /// - Windows: `%APPDATA%\iarchain`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the config file path
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for IarchainDirs {
    fn default() -> Self {
        Self::new()
    }
}
