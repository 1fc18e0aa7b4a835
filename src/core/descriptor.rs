//! Architecture descriptors and the profiles that build them
//!
//! An [`ArchitectureProfile`] knows where one architecture's tools live
//! relative to an install root. Building a profile against a concrete root
//! yields an [`ArchitectureDescriptor`] holding absolute paths.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::defaults::{COMMON_BIN_DIR, COMMON_DIR};
use crate::core::platform::Architecture;

/// Preprocessor definitions, name to optional value
pub type Definitions = BTreeMap<String, Option<String>>;

/// Resolved toolchain layout for one architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureDescriptor {
    common_dir: PathBuf,
    common_path: PathBuf,
    binary_path: PathBuf,
    library_path: PathBuf,
    include_path: PathBuf,
    assembler_path: PathBuf,
    compiler_path: PathBuf,
    linker_path: PathBuf,
    archiver_path: PathBuf,
    definitions: Definitions,
}

impl ArchitectureDescriptor {
    /// Workbench-level directory (`<root>/common`)
    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    /// Shared runtime binaries (`<root>/common/bin`)
    pub fn common_path(&self) -> &Path {
        &self.common_path
    }

    /// Architecture binary directory
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Architecture library directory
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    /// Architecture include directory
    pub fn include_path(&self) -> &Path {
        &self.include_path
    }

    /// Assembler executable
    pub fn assembler_path(&self) -> &Path {
        &self.assembler_path
    }

    /// C/C++ compiler executable
    pub fn compiler_path(&self) -> &Path {
        &self.compiler_path
    }

    /// Linker executable
    pub fn linker_path(&self) -> &Path {
        &self.linker_path
    }

    /// Static library archiver executable
    pub fn archiver_path(&self) -> &Path {
        &self.archiver_path
    }

    /// Definitions every compilation for this architecture receives
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Whether the common, binary and library directories all exist
    pub fn is_installed(&self) -> bool {
        self.common_dir.exists() && self.binary_path.exists() && self.library_path.exists()
    }
}

/// Path and file name conventions of one supported architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitectureProfile {
    /// Architecture identifier, parsed with [`Architecture::parse`]
    pub architecture: &'static str,
    /// Binary directory relative to the base path
    pub bin_dir: &'static str,
    /// Library directory relative to the base path
    pub lib_dir: &'static str,
    /// Include directory relative to the base path
    pub include_dir: &'static str,
    /// Assembler file name
    pub assembler: &'static str,
    /// Compiler file name
    pub compiler: &'static str,
    /// Linker file name
    pub linker: &'static str,
    /// Archiver file name
    pub archiver: &'static str,
    /// Definitions added to every compilation
    pub definitions: &'static [(&'static str, Option<&'static str>)],
}

/// IAR Embedded Workbench for ARM
pub const ARM: ArchitectureProfile = ArchitectureProfile {
    architecture: "arm",
    bin_dir: "arm/bin",
    lib_dir: "arm/lib",
    include_dir: "arm/inc",
    assembler: "iasmarm.exe",
    compiler: "iccarm.exe",
    linker: "ilinkarm.exe",
    archiver: "iarchive.exe",
    definitions: &[],
};

/// Every architecture the locator probes for
pub const PROFILES: &[ArchitectureProfile] = &[ARM];

impl ArchitectureProfile {
    /// Architecture this profile describes
    pub fn architecture(&self) -> Architecture {
        Architecture::parse(self.architecture)
    }

    /// Binary directory under `base_path`
    pub fn bin_path(&self, base_path: &Path) -> PathBuf {
        base_path.join(self.bin_dir)
    }

    /// Compiler executable under `base_path`
    pub fn compiler_path(&self, base_path: &Path) -> PathBuf {
        self.bin_path(base_path).join(self.compiler)
    }

    /// Compose the descriptor for an install
    ///
    /// Pure path composition: nothing is read from disk until
    /// [`ArchitectureDescriptor::is_installed`] is called.
    pub fn build(&self, base_path: &Path, toolchain_root: &Path) -> ArchitectureDescriptor {
        let binary_path = self.bin_path(base_path);
        ArchitectureDescriptor {
            common_dir: toolchain_root.join(COMMON_DIR),
            common_path: toolchain_root.join(COMMON_BIN_DIR),
            library_path: base_path.join(self.lib_dir),
            include_path: base_path.join(self.include_dir),
            assembler_path: binary_path.join(self.assembler),
            compiler_path: binary_path.join(self.compiler),
            linker_path: binary_path.join(self.linker),
            archiver_path: binary_path.join(self.archiver),
            binary_path,
            definitions: self
                .definitions
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.map(String::from)))
                .collect(),
        }
    }
}
