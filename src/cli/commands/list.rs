//! CLI command for `iarchain list`

use anyhow::Result;

use super::{install_json, HostLocator};
use crate::cli::output::{create_spinner, is_json, print_detail, print_json, print_success, print_warning};
use crate::core::search::SearchResult;

/// Execute the list command
pub fn execute(locator: &HostLocator) -> Result<()> {
    let spinner = create_spinner("Probing IAR Embedded Workbench installs...");
    let results = locator.locate_all();
    spinner.finish_and_clear();

    if is_json() {
        let installs: Vec<_> = results
            .iter()
            .filter_map(SearchResult::install)
            .map(|install| install_json(install))
            .collect();
        let reasons: Vec<_> = results
            .iter()
            .filter_map(SearchResult::explanation)
            .flat_map(|explanation| explanation.reasons().iter().cloned())
            .collect();
        print_json(&serde_json::json!({
            "status": if installs.is_empty() { "not_found" } else { "success" },
            "installs": installs,
            "reasons": reasons,
        }));
        return Ok(());
    }

    for result in &results {
        match result {
            SearchResult::Found(install) => {
                print_success(&format!("{} ({})", install.name(), install.version()));
                print_detail(&install.root().display().to_string());
            }
            SearchResult::NotFound(explanation) => {
                print_warning("No IAR Embedded Workbench install found");
                for reason in explanation.reasons() {
                    print_detail(reason);
                }
            }
        }
    }
    Ok(())
}
