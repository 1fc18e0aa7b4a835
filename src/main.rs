//! iarchain CLI - IAR Embedded Workbench toolchain discovery
//!
//! Entry point for the iarchain command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iarchain::cli::output::{display_error, OutputConfig};
use iarchain::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.apply_global();

    // RUST_LOG wins over -v
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(output_config.log_level().into())
                .from_env_lossy(),
        )
        .init();

    // Run the command and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
