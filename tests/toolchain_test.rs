//! Integration tests for discovery through tool configuration
//!
//! Builds workbench trees on disk, locates them and checks the configured
//! invocations.

mod common;

use std::sync::Arc;

use common::Workbench;
use iarchain::config::registry::{EWARM_VERSIONS_KEY, INSTALL_PATH_VALUE};
use iarchain::core::build_spec::{CompileSpec, LinkSpec};
use iarchain::core::locator::WorkbenchLocator;
use iarchain::core::platform::{Architecture, OperatingSystem, TargetPlatform};
use iarchain::core::search::SearchResult;
use iarchain::core::settings::Settings;
use iarchain::core::tool_provider::{PlatformToolChainConfig, PlatformToolProvider, ToolType};
use iarchain::core::toolchain::IarToolChain;
use iarchain::infra::environment::MapEnv;
use iarchain::infra::registry::InMemoryRegistry;

fn windows_arm() -> TargetPlatform {
    TargetPlatform::for_os_and_arch(OperatingSystem::Windows, Architecture::Arm)
}

fn registry_with(installs: &[(&str, &Workbench)]) -> InMemoryRegistry {
    installs.iter().fold(
        InMemoryRegistry::new().with_key(EWARM_VERSIONS_KEY),
        |registry, (version, workbench)| {
            registry.with_value(
                &format!("{EWARM_VERSIONS_KEY}\\{version}"),
                INSTALL_PATH_VALUE,
                &workbench.root().display().to_string(),
            )
        },
    )
}

#[test]
fn test_minimal_install_end_to_end() {
    let workbench = Workbench::minimal();
    let locator = WorkbenchLocator::new(InMemoryRegistry::new());

    let result = locator.locate_default(Some(&workbench.root()));
    let SearchResult::Found(install) = result else {
        panic!("expected the minimal install to be accepted");
    };

    let env = MapEnv::new();
    let tools = PlatformToolProvider::new(&env)
        .configure(&install, &windows_arm(), &PlatformToolChainConfig::new(windows_arm()))
        .unwrap();

    assert_eq!(tools.compile_c.executable(), workbench.path("arm/bin/iccarm.exe"));
    let args = tools.compile_c.compile_args(&CompileSpec::new().include("src")).unwrap();
    assert_eq!(args[0], format!("-I{}", workbench.path("arm/inc").display()));
    assert_eq!(args.len(), 2);
}

#[test]
fn test_registry_installs_ranked_newest_first() {
    let older = Workbench::new();
    let newer = Workbench::new();
    let broken = Workbench::new();
    broken.remove("common");

    let registry = registry_with(&[("7.80.4", &older), ("8.10.1", &newer), ("9.0.0", &broken)]);
    let locator = WorkbenchLocator::new(registry);

    let results = locator.locate_all();
    let names: Vec<_> = results
        .iter()
        .map(|result| result.install().unwrap().name().to_string())
        .collect();
    assert_eq!(names, ["IAR ARM 8.10.1", "IAR ARM 7.80.4"]);

    let default = locator.locate_default(None);
    assert_eq!(default.install().unwrap().root(), newer.root());
}

#[test]
fn test_locate_all_without_registry_key() {
    let locator = WorkbenchLocator::new(InMemoryRegistry::new());
    let results = locator.locate_all();

    assert_eq!(results.len(), 1);
    assert!(!results[0].is_available());
    assert!(locator.locate_default(None).explanation().is_some());
}

#[test]
fn test_rejected_candidate_message() {
    let workbench = Workbench::new();
    workbench.remove("arm/bin/iccarm.exe");
    let locator = WorkbenchLocator::new(InMemoryRegistry::new());

    let result = locator.locate_default(Some(&workbench.root()));
    let explanation = result.explanation().unwrap().to_string();
    assert!(explanation.contains("does not appear to contain an IAR Workbench installation"));
    assert!(explanation.contains(&workbench.root().display().to_string()));
}

#[test]
fn test_shared_locator_returns_same_install() {
    let workbench = Workbench::new();
    let locator = Arc::new(WorkbenchLocator::new(registry_with(&[("9.10.2", &workbench)])));

    let first = IarToolChain::with_default_name(Arc::clone(&locator)).with_host(OperatingSystem::Windows);
    let mut second = IarToolChain::new("iarArmUser", Arc::clone(&locator)).with_host(OperatingSystem::Windows);
    second.set_install_dir(Some(workbench.root()));

    let a = first.install().unwrap();
    let b = second.install().unwrap();
    assert!(Arc::ptr_eq(a, b));
    assert_eq!(b.name(), "IAR ARM 9.10.2");
}

#[test]
fn test_toolchain_select_with_settings() {
    let workbench = Workbench::new();
    let settings: Settings = toml::from_str(&format!(
        r#"
[toolchain]
name = "ewarm"
install_dir = {:?}

[tools.linker]
args = ["--semihosting"]
"#,
        workbench.root().display().to_string()
    ))
    .unwrap();

    let locator = Arc::new(WorkbenchLocator::new(InMemoryRegistry::new()));
    let mut toolchain = IarToolChain::with_default_name(locator)
        .with_host(OperatingSystem::Windows)
        .with_env(MapEnv::new().with_var("LIB", "C:/msvc/lib"));
    settings.apply(&mut toolchain);

    assert_eq!(toolchain.to_string(), "Tool chain 'ewarm' (IAR)");
    let selection = toolchain.select(&windows_arm());
    let tools = selection.tools().unwrap();

    let link = tools.get(ToolType::Linker);
    let args = link.link_args(&LinkSpec::new().object("main.o")).unwrap();
    assert_eq!(args.last().map(String::as_str), Some("--semihosting"));
    assert_eq!(link.environment()["LIB"], "");
    assert_eq!(link.path_entries(), [workbench.path("common/bin")]);
}

#[test]
fn test_select_collects_unavailable_reasons() {
    let locator = Arc::new(WorkbenchLocator::new(InMemoryRegistry::new()));
    let toolchain = IarToolChain::with_default_name(locator).with_host(OperatingSystem::Windows);

    let selection = toolchain.select(&windows_arm());
    let explanation = selection.explanation().unwrap();
    assert_eq!(
        explanation.reasons(),
        ["Could not locate an IAR Workbench installation, using the Windows registry."]
    );
}
