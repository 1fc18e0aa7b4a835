//! CLI command for `iarchain locate`

use std::path::Path;

use anyhow::Result;

use super::{install_json, HostLocator};
use crate::cli::output::{is_json, print_detail, print_json, print_success};
use crate::core::search::SearchResult;

/// Execute the locate command
pub fn execute(locator: &HostLocator, install_dir: Option<&Path>) -> Result<()> {
    match locator.locate_default(install_dir) {
        SearchResult::Found(install) => {
            if is_json() {
                print_json(&serde_json::json!({
                    "status": "success",
                    "install": install_json(&install),
                }));
            } else {
                print_success(&format!("{} ({})", install.name(), install.version()));
                print_detail(&format!("Root: {}", install.root().display()));
                let architectures: Vec<_> = install.architectures().map(ToString::to_string).collect();
                print_detail(&format!("Architectures: {}", architectures.join(", ")));
            }
            Ok(())
        }
        SearchResult::NotFound(explanation) => {
            anyhow::bail!("No usable IAR Embedded Workbench install\n{explanation}")
        }
    }
}
