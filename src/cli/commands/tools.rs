//! CLI command for `iarchain tools`
//!
//! Prints the configured invocation of every build step with empty inputs,
//! which shows the executable, search path, environment and the arguments
//! the tool chain always adds.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::HostLocator;
use crate::cli::output::{is_json, print_detail, print_info, print_json, print_success};
use crate::core::build_spec::{ArchiveSpec, CompileSpec, LinkSpec};
use crate::core::platform::{Architecture, OperatingSystem, TargetPlatform};
use crate::core::settings::Settings;
use crate::core::tool_provider::{ArgsTransform, Invocation, ToolInvocationConfig};
use crate::core::toolchain::{IarToolChain, PlatformToolSelection};

/// Execute the tools command
pub fn execute(
    locator: Arc<HostLocator>,
    settings: &Settings,
    arch: &str,
    os: &str,
    install_dir: Option<PathBuf>,
) -> Result<()> {
    let mut toolchain = IarToolChain::with_default_name(locator);
    toolchain.set_install_dir(install_dir);
    settings.apply(&mut toolchain);

    let platform = TargetPlatform::for_os_and_arch(OperatingSystem::parse(os), Architecture::parse(arch));
    let tools = match toolchain.select(&platform) {
        PlatformToolSelection::Available(tools) => tools,
        PlatformToolSelection::Unavailable(explanation) => {
            anyhow::bail!("{toolchain} cannot build for '{platform}'\n{explanation}")
        }
    };

    let invocations = tools
        .iter()
        .map(|config| Ok((config, default_invocation(config)?)))
        .collect::<Result<Vec<_>>>()?;

    if is_json() {
        let entries: Vec<_> = invocations
            .iter()
            .map(|(config, invocation)| {
                serde_json::json!({
                    "tool": config.tool_type(),
                    "label": config.label(),
                    "invocation": invocation,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "status": "success",
            "toolchain": toolchain.to_string(),
            "platform": platform.to_string(),
            "tools": entries,
        }));
        return Ok(());
    }

    print_info(&format!("{toolchain} for {platform}"));
    let serializer = settings.serializer();
    for (config, invocation) in &invocations {
        println!();
        print_success(config.label());
        print_detail(&format!("Executable: {}", invocation.executable().display()));
        for entry in invocation.path_entries() {
            print_detail(&format!("PATH += {}", entry.display()));
        }
        let cleared: Vec<_> = invocation.environment().keys().map(String::as_str).collect();
        print_detail(&format!("Cleared: {}", cleared.join(", ")));
        if !invocation.args().is_empty() {
            print_detail(&format!("Args: {}", serializer.render(invocation.args())));
        }
    }
    Ok(())
}

fn default_invocation(config: &ToolInvocationConfig) -> Result<Invocation> {
    let args = match config.transform() {
        ArgsTransform::Compile { .. } => config.compile_args(&CompileSpec::new())?,
        ArgsTransform::Link { .. } => config.link_args(&LinkSpec::new())?,
        ArgsTransform::Archive => config.archive_args(&ArchiveSpec::new())?,
    };
    Ok(config.invocation(args))
}
