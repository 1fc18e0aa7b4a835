//! Common test utilities and helpers
//!
//! Builds synthetic IAR Embedded Workbench directory trees for integration
//! tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use assert_fs::prelude::*;
use assert_fs::TempDir;

/// Executables of the ARM profile
pub const ARM_EXECUTABLES: [&str; 4] = ["iccarm.exe", "ilinkarm.exe", "iarchive.exe", "iasmarm.exe"];

/// A fake workbench install in a temporary directory
pub struct Workbench {
    /// Temporary directory holding the install
    pub dir: TempDir,
}

impl Workbench {
    /// Complete install: `common/bin`, `arm/{bin,lib,inc}` and every executable
    pub fn new() -> Self {
        let workbench = Self::empty();
        workbench.create_dir("common/bin");
        workbench.create_dir("arm/lib");
        workbench.create_dir("arm/inc");
        for exe in ARM_EXECUTABLES {
            workbench.create_file(&format!("arm/bin/{exe}"));
        }
        workbench
    }

    /// Smallest accepted layout: `common/` without `common/bin`
    pub fn minimal() -> Self {
        let workbench = Self::empty();
        workbench.create_dir("common");
        workbench.create_dir("arm/lib");
        workbench.create_dir("arm/inc");
        for exe in ARM_EXECUTABLES {
            workbench.create_file(&format!("arm/bin/{exe}"));
        }
        workbench
    }

    /// No files at all
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Canonical install root
    pub fn root(&self) -> PathBuf {
        iarchain::infra::filesystem::canonicalize(self.dir.path())
    }

    /// Path below the install root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn create_dir(&self, relative: &str) {
        self.dir
            .child(relative)
            .create_dir_all()
            .expect("Failed to create directory");
    }

    pub fn create_file(&self, relative: &str) {
        let file = self.dir.child(relative);
        if let Some(parent) = file.path().parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        file.touch().expect("Failed to create file");
    }

    pub fn remove(&self, relative: &str) {
        let path = self.dir.path().join(relative);
        if path.is_dir() {
            std::fs::remove_dir_all(path).expect("Failed to remove directory");
        } else {
            std::fs::remove_file(path).expect("Failed to remove file");
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the iarchain binary with an isolated config directory
pub fn run_iarchain(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iarchain"))
        .env("IARCHAIN_CONFIG_DIR", config_dir)
        .env_remove("IARCHAIN_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute iarchain")
}
