//! Toolchain installs
//!
//! A [`ToolchainInstall`] is one located IAR Embedded Workbench directory with
//! the architectures it actually has installed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::descriptor::{ArchitectureDescriptor, Definitions};
use crate::core::platform::{Architecture, TargetPlatform};
use crate::core::version::ToolchainVersion;
use crate::error::ToolchainError;

/// One located toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInstall {
    name: String,
    version: ToolchainVersion,
    root: PathBuf,
    descriptors: BTreeMap<Architecture, ArchitectureDescriptor>,
}

impl ToolchainInstall {
    /// Create an install from its installed architecture descriptors
    pub fn new(
        name: &str,
        version: ToolchainVersion,
        root: PathBuf,
        descriptors: BTreeMap<Architecture, ArchitectureDescriptor>,
    ) -> Self {
        Self {
            name: name.to_string(),
            version,
            root,
            descriptors,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version, `Unknown` for user-specified installs
    pub fn version(&self) -> &ToolchainVersion {
        &self.version
    }

    /// Canonical install root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installed architectures, in order
    pub fn architectures(&self) -> impl Iterator<Item = &Architecture> {
        self.descriptors.keys()
    }

    /// Whether this install can build for `platform`
    ///
    /// IAR tools only target Windows hosts, so the platform must run Windows
    /// and its architecture must be installed.
    pub fn is_supported_platform(&self, platform: &TargetPlatform) -> bool {
        platform.operating_system().is_windows()
            && self.descriptors.contains_key(platform.architecture())
    }

    /// Descriptor for `platform`
    pub fn resolve(&self, platform: &TargetPlatform) -> Result<&ArchitectureDescriptor, ToolchainError> {
        self.descriptors
            .get(platform.architecture())
            .filter(|_| platform.operating_system().is_windows())
            .ok_or_else(|| ToolchainError::UnsupportedPlatform {
                toolchain: self.name.clone(),
                platform: platform.name().to_string(),
            })
    }

    /// Shared runtime binaries for `platform`
    pub fn common_path(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.common_path())
    }

    /// Compiler executable for `platform`
    pub fn compiler(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.compiler_path())
    }

    /// Linker executable for `platform`
    pub fn linker(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.linker_path())
    }

    /// Archiver executable for `platform`
    pub fn archiver(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.archiver_path())
    }

    /// Assembler executable for `platform`
    pub fn assembler(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.assembler_path())
    }

    /// Binary directory for `platform`
    pub fn binary_path(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.binary_path())
    }

    /// Library directory for `platform`
    pub fn library_path(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.library_path())
    }

    /// Include directory for `platform`
    pub fn include_path(&self, platform: &TargetPlatform) -> Result<&Path, ToolchainError> {
        Ok(self.resolve(platform)?.include_path())
    }

    /// Definitions for `platform`
    pub fn definitions(&self, platform: &TargetPlatform) -> Result<&Definitions, ToolchainError> {
        Ok(self.resolve(platform)?.definitions())
    }
}
