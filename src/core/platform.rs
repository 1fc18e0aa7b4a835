//! Target platform model
//!
//! A target platform pairs an operating system with an instruction-set
//! architecture. IAR tools only run on Windows, so the operating system of the
//! target decides whether an install can serve it at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system of a target platform (or of the host)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingSystem {
    /// Microsoft Windows
    Windows,
    /// Linux
    Linux,
    /// macOS
    MacOs,
    /// Anything else, kept verbatim
    Other(String),
}

impl OperatingSystem {
    /// Detect the operating system this process runs on
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Parse an operating system name, accepting common aliases
    pub fn parse(input: &str) -> Self {
        match input.to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win" => Self::Windows,
            "linux" => Self::Linux,
            "macos" | "osx" | "darwin" | "mac os x" => Self::MacOs,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this is Windows
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Instruction-set architecture of a target platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Architecture {
    /// 32-bit ARM
    Arm,
    /// 64-bit ARM
    Aarch64,
    /// 32-bit x86
    X86,
    /// 64-bit x86
    X86_64,
    /// Anything else, kept verbatim
    Other(String),
}

impl Architecture {
    /// Parse an architecture name, accepting common aliases
    pub fn parse(input: &str) -> Self {
        match input.to_ascii_lowercase().as_str() {
            "arm" | "arm-v7" | "armv7" | "arm32" | "thumbv7" | "thumbv7m" | "thumbv7em" => {
                Self::Arm
            }
            "aarch64" | "arm64" | "arm-v8" | "armv8" => Self::Aarch64,
            "x86" | "i386" | "i586" | "i686" | "ia-32" => Self::X86,
            "x86_64" | "x86-64" | "amd64" | "x64" => Self::X86_64,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arm => write!(f, "arm"),
            Self::Aarch64 => write!(f, "aarch64"),
            Self::X86 => write!(f, "x86"),
            Self::X86_64 => write!(f, "x86_64"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A platform binaries are built for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetPlatform {
    name: String,
    operating_system: OperatingSystem,
    architecture: Architecture,
}

impl TargetPlatform {
    /// Create a named target platform
    pub fn new(name: &str, operating_system: OperatingSystem, architecture: Architecture) -> Self {
        Self {
            name: name.to_string(),
            operating_system,
            architecture,
        }
    }

    /// Create a platform named `<os>-<arch>`
    pub fn for_os_and_arch(operating_system: OperatingSystem, architecture: Architecture) -> Self {
        let name = format!("{operating_system}-{architecture}");
        Self::new(&name, operating_system, architecture)
    }

    /// Platform name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operating system of the platform
    pub fn operating_system(&self) -> &OperatingSystem {
        &self.operating_system
    }

    /// Architecture of the platform
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_aliases() {
        assert_eq!(Architecture::parse("arm"), Architecture::Arm);
        assert_eq!(Architecture::parse("ARMv7"), Architecture::Arm);
        assert_eq!(Architecture::parse("thumbv7em"), Architecture::Arm);
        assert_eq!(Architecture::parse("arm64"), Architecture::Aarch64);
        assert_eq!(Architecture::parse("amd64"), Architecture::X86_64);
        assert_eq!(
            Architecture::parse("riscv32"),
            Architecture::Other("riscv32".to_string())
        );
    }

    #[test]
    fn test_operating_system_aliases() {
        assert!(OperatingSystem::parse("Windows").is_windows());
        assert!(OperatingSystem::parse("win32").is_windows());
        assert_eq!(OperatingSystem::parse("darwin"), OperatingSystem::MacOs);
        assert!(!OperatingSystem::parse("linux").is_windows());
    }

    #[test]
    fn test_platform_name_from_parts() {
        let platform = TargetPlatform::for_os_and_arch(OperatingSystem::Windows, Architecture::Arm);
        assert_eq!(platform.name(), "windows-arm");
        assert_eq!(platform.to_string(), "windows-arm");
    }
}
