//! User settings
//!
//! Reads `config.toml` from the config directory (or an explicit path) and
//! applies it to an [`IarToolChain`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::args::{ArgSerializer, ArgStyle};
use crate::core::tool_provider::ToolType;
use crate::core::toolchain::IarToolChain;
use crate::infra::dirs::IarchainDirs;
use crate::infra::registry::Registry;

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },

    /// A `[tools.<key>]` table names no known tool
    #[error("Unknown tool '{key}' in config file '{path}'")]
    UnknownTool { path: String, key: String },
}

/// Settings for iarchain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Tool chain settings
    #[serde(default)]
    pub toolchain: ToolchainSettings,

    /// Per-tool settings, keyed by tool (`c_compiler`, `linker`, ...)
    #[serde(default)]
    pub tools: BTreeMap<String, ToolSettings>,
}

/// Tool chain settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainSettings {
    /// Tool chain name
    pub name: Option<String>,

    /// Explicit install directory, skipping registry selection
    pub install_dir: Option<PathBuf>,

    /// Argument quoting style
    pub arg_style: Option<ArgStyle>,
}

/// Settings for one tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Arguments appended to every invocation
    #[serde(default)]
    pub args: Vec<String>,
}

impl Settings {
    /// Load settings from the config directory
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::ParseError` if the file exists but contains
    /// invalid TOML.
    pub fn load(dirs: &IarchainDirs) -> Result<Self, SettingsError> {
        Self::load_from_path(&dirs.config_path())
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        if let Some(key) = settings
            .tools
            .keys()
            .find(|key| ToolType::from_config_key(key).is_none())
        {
            return Err(SettingsError::UnknownTool {
                path: path.display().to_string(),
                key: key.clone(),
            });
        }
        Ok(settings)
    }

    /// Serializer for the configured argument style
    #[must_use]
    pub fn serializer(&self) -> ArgSerializer {
        ArgSerializer::new(self.toolchain.arg_style.unwrap_or_default())
    }

    /// Apply name, install directory and tool arguments to `toolchain`
    ///
    /// An install directory already set on the tool chain wins.
    pub fn apply<R: Registry>(&self, toolchain: &mut IarToolChain<R>) {
        if let Some(name) = &self.toolchain.name {
            toolchain.set_name(name);
        }
        if toolchain.install_dir().is_none() && self.toolchain.install_dir.is_some() {
            toolchain.set_install_dir(self.toolchain.install_dir.clone());
        }

        let tool_args: Vec<(ToolType, Vec<String>)> = self
            .tools
            .iter()
            .filter(|(_, tool)| !tool.args.is_empty())
            .filter_map(|(key, tool)| ToolType::from_config_key(key).map(|t| (t, tool.args.clone())))
            .collect();
        if !tool_args.is_empty() {
            toolchain.each_platform(move |config| {
                for (tool, args) in &tool_args {
                    config.tool_mut(*tool).add_args(args.iter().cloned());
                }
            });
        }
    }
}
