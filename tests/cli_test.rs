//! Integration tests for the `iarchain` binary

mod common;

use common::{run_iarchain, Workbench};
use predicates::prelude::*;
use tempfile::TempDir;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_args_renders_command_line() {
    let config = TempDir::new().unwrap();
    let output = run_iarchain(config.path(), &["args", "--", "a", "b c", "d"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a \"b c\" d\n");
}

#[test]
fn test_args_escaped_style() {
    let config = TempDir::new().unwrap();
    let output = run_iarchain(config.path(), &["args", "--escaped", "--", r#"x"y"#]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\"x\\\"y\"\n");
}

#[test]
fn test_args_style_from_config_file() {
    let config = TempDir::new().unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        "[toolchain]\narg_style = \"escaped\"\n",
    )
    .unwrap();

    let output = run_iarchain(config.path(), &["args", "--", r"a\b"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\\\\b\n");
}

#[test]
fn test_args_response_file() {
    let config = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("rsp/compile.txt");
    let file_arg = file.display().to_string();

    let output = run_iarchain(
        config.path(),
        &["args", "--response-file", &file_arg, "--", "-Ifoo", "-Dbar"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(predicate::str::starts_with("-f ").eval(&stdout(&output)));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "-Ifoo -Dbar\n");
}

#[test]
fn test_args_json_output() {
    let config = TempDir::new().unwrap();
    let output = run_iarchain(config.path(), &["--json", "args", "--", "a b"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["style"], "windows");
    assert_eq!(json["command_line"], "\"a b\"");
}

#[test]
fn test_locate_user_install() {
    let config = TempDir::new().unwrap();
    let workbench = Workbench::new();
    let root = workbench.root().display().to_string();

    let output = run_iarchain(config.path(), &["locate", "--install-dir", &root]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(predicate::str::contains("IAR ARM from user provided path").eval(&out));
    assert!(predicate::str::contains("unknown").eval(&out));
    assert!(predicate::str::contains("arm").eval(&out));
}

#[test]
fn test_locate_install_from_config_file() {
    let config = TempDir::new().unwrap();
    let workbench = Workbench::new();
    std::fs::write(
        config.path().join("config.toml"),
        format!("[toolchain]\ninstall_dir = {:?}\n", workbench.root().display().to_string()),
    )
    .unwrap();

    let output = run_iarchain(config.path(), &["--json", "locate"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["install"]["version"], "unknown");
    assert_eq!(json["install"]["architectures"][0], "arm");
}

#[test]
fn test_locate_rejects_non_install() {
    let config = TempDir::new().unwrap();
    let workbench = Workbench::empty();
    let root = workbench.root().display().to_string();

    let output = run_iarchain(config.path(), &["locate", "--install-dir", &root]);

    assert!(!output.status.success());
    assert!(predicate::str::contains("does not appear to contain an IAR Workbench installation")
        .eval(&stderr(&output)));
}

#[test]
fn test_list_never_empty() {
    let config = TempDir::new().unwrap();
    let output = run_iarchain(config.path(), &["--json", "list"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let installs = json["installs"].as_array().unwrap().len();
    let reasons = json["reasons"].as_array().unwrap().len();
    assert!(installs + reasons > 0);
}

#[cfg(not(windows))]
#[test]
fn test_tools_unavailable_off_windows() {
    let config = TempDir::new().unwrap();
    let workbench = Workbench::new();
    let root = workbench.root().display().to_string();

    let output = run_iarchain(config.path(), &["tools", "--arch", "arm", "--install-dir", &root]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(predicate::str::contains("Tool chain 'iarArm' (IAR)").eval(&err));
    assert!(predicate::str::contains("IAR is not available on this operating system.").eval(&err));
}

#[test]
fn test_invalid_config_file_fails() {
    let config = TempDir::new().unwrap();
    std::fs::write(config.path().join("config.toml"), "invalid toml [[[").unwrap();

    let output = run_iarchain(config.path(), &["args", "--", "a"]);
    assert!(!output.status.success());
    assert!(predicate::str::contains("Failed to parse config file").eval(&stderr(&output)));
}

#[test]
fn test_missing_explicit_config_fails() {
    let config = TempDir::new().unwrap();
    let missing = config.path().join("nope.toml").display().to_string();

    let output = run_iarchain(config.path(), &["--config", &missing, "list"]);
    assert!(!output.status.success());
    assert!(predicate::str::contains("does not exist").eval(&stderr(&output)));
}
