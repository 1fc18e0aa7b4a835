//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Result;
use clap::Parser;

use commands::Commands;

/// Version string with the git commit it was built from, when known
fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        let version = crate::core::version::CURRENT_VERSION;
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) => format!("{version} ({sha})"),
            None => version.to_string(),
        }
    })
}

/// iarchain - IAR Embedded Workbench toolchain discovery
///
/// Locate IAR Embedded Workbench for ARM installs and show how each build
/// tool would be invoked.
#[derive(Parser, Debug)]
#[command(name = "iarchain")]
#[command(author, version, long_version = long_version(), about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from this file instead of the config directory
    #[arg(long, global = true, env = "IARCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            let settings = commands::load_settings(self.config.as_deref())?;
            cmd.run(&settings)
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
