//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod args;
pub mod list;
pub mod locate;
pub mod tools;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::core::install::ToolchainInstall;
use crate::core::locator::WorkbenchLocator;
use crate::core::settings::Settings;
use crate::infra::dirs::IarchainDirs;
use crate::infra::registry::{host_registry, Registry};

/// Locator over the registry of the running host
pub type HostLocator = WorkbenchLocator<Box<dyn Registry + Send + Sync>>;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every discovered IAR Embedded Workbench install
    List,

    /// Show the install that would be used
    Locate {
        /// Use this install directory instead of the newest registered one
        #[arg(long)]
        install_dir: Option<PathBuf>,
    },

    /// Show how each build tool is invoked for a target platform
    Tools {
        /// Target architecture (arm, armv7, thumbv7em, ...)
        #[arg(long)]
        arch: String,

        /// Target operating system
        #[arg(long, default_value = "windows")]
        os: String,

        /// Use this install directory instead of the newest registered one
        #[arg(long)]
        install_dir: Option<PathBuf>,
    },

    /// Render arguments as a command line or a response file
    Args {
        /// Backslash-escape quotes and backslashes
        #[arg(long)]
        escaped: bool,

        /// Write the arguments to this file and print the reference to it
        #[arg(long)]
        response_file: Option<PathBuf>,

        /// Arguments to render
        #[arg(last = true)]
        args: Vec<String>,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Commands::List => list::execute(&host_locator()),
            Commands::Locate { install_dir } => {
                let install_dir = install_dir.or_else(|| settings.toolchain.install_dir.clone());
                locate::execute(&host_locator(), install_dir.as_deref())
            }
            Commands::Tools {
                arch,
                os,
                install_dir,
            } => tools::execute(host_locator(), settings, &arch, &os, install_dir),
            Commands::Args {
                escaped,
                response_file,
                args,
            } => {
                let serializer = if escaped {
                    crate::core::args::ArgSerializer::escaped()
                } else {
                    settings.serializer()
                };
                args::execute(&serializer, response_file.as_deref(), args)
            }
        }
    }
}

/// Load settings from `config`, or from the config directory
///
/// An explicitly named file must exist.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file '{}' does not exist", path.display());
            }
            Settings::load_from_path(path)
                .with_context(|| format!("Failed to load settings from '{}'", path.display()))
        }
        None => Ok(Settings::load(&IarchainDirs::new())?),
    }
}

/// Fresh discovery session for this host
pub fn host_locator() -> Arc<HostLocator> {
    Arc::new(WorkbenchLocator::new(host_registry()))
}

/// JSON description of an install
pub fn install_json(install: &ToolchainInstall) -> serde_json::Value {
    serde_json::json!({
        "name": install.name(),
        "version": install.version().to_string(),
        "root": install.root().display().to_string(),
        "architectures": install.architectures().map(ToString::to_string).collect::<Vec<_>>(),
    })
}
