//! Workbench discovery
//!
//! The locator finds IAR Embedded Workbench installs, validates their layout
//! and caches one [`ToolchainInstall`] per canonical root directory.
//!
//! # Discovery
//!
//! Installed versions are listed as subkeys of
//! [`EWARM_VERSIONS_KEY`](crate::config::registry::EWARM_VERSIONS_KEY). Each
//! subkey named `major.minor.patch` holds an `InstallPath` value. A root is
//! accepted when it has a `common/` directory and at least one architecture
//! profile finds its compiler. Anything else is skipped with a debug
//! diagnostic; a missing registry key simply means nothing is installed.
//!
//! Registry discovery runs at most once per locator. The install cache only
//! grows: an entry, once inserted, is returned for every later lookup of the
//! same root.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::config::defaults::{COMMON_DIR, REGISTRY_INSTALL_NAME_PREFIX, USER_PROVIDED_INSTALL_NAME};
use crate::config::registry::{EWARM_VERSIONS_KEY, INSTALL_PATH_VALUE};
use crate::core::descriptor::{ArchitectureProfile, PROFILES};
use crate::core::install::ToolchainInstall;
use crate::core::search::SearchResult;
use crate::core::version::{is_version_key, ToolchainVersion};
use crate::error::RegistryError;
use crate::infra::filesystem;
use crate::infra::registry::Registry;

/// Explanation when discovery found nothing at all
pub const NOTHING_INSTALLED: &str =
    "Could not locate an IAR Embedded Workbench installation, using the Windows registry and system path.";

/// Explanation when no default install exists
pub const NO_DEFAULT_INSTALL: &str =
    "Could not locate an IAR Workbench installation, using the Windows registry.";

/// Discovers and caches toolchain installs
///
/// One locator is one discovery session: build it once per build invocation
/// and share it by reference (or `Arc`) with everything that needs an install.
pub struct WorkbenchLocator<R> {
    registry: R,
    versions_key: String,
    profiles: &'static [ArchitectureProfile],
    discovered: OnceLock<()>,
    installs: RwLock<HashMap<PathBuf, Arc<ToolchainInstall>>>,
}

impl<R: Registry> WorkbenchLocator<R> {
    /// Create a locator reading the standard EWARM registry key
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            versions_key: EWARM_VERSIONS_KEY.to_string(),
            profiles: PROFILES,
            discovered: OnceLock::new(),
            installs: RwLock::new(HashMap::new()),
        }
    }

    /// Read installed versions from another registry key
    #[must_use]
    pub fn with_versions_key(mut self, key: &str) -> Self {
        self.versions_key = key.to_string();
        self
    }

    /// Every discovered install, newest first
    ///
    /// Never empty: when nothing is installed the single entry is a
    /// `NotFound` explaining that.
    pub fn locate_all(&self) -> Vec<SearchResult> {
        self.ensure_discovered();

        let installs = self.sorted_installs();
        if installs.is_empty() {
            return vec![SearchResult::not_found(NOTHING_INSTALLED)];
        }
        installs.into_iter().map(SearchResult::Found).collect()
    }

    /// The install to use by default
    ///
    /// With a `candidate` directory only that directory is considered. Without
    /// one, the newest discovered install is returned.
    pub fn locate_default(&self, candidate: Option<&Path>) -> SearchResult {
        self.ensure_discovered();

        match candidate {
            Some(candidate) => self.locate_user_specified(candidate),
            None => self.determine_default(),
        }
    }

    fn ensure_discovered(&self) {
        self.discovered.get_or_init(|| self.discover_from_registry());
    }

    fn discover_from_registry(&self) {
        let subkeys = match self.registry.subkeys(&self.versions_key) {
            Ok(subkeys) => subkeys,
            Err(RegistryError::KeyNotFound { .. }) => {
                tracing::debug!("Unable to find IAR installation information in registry.");
                return;
            }
            Err(e) => {
                tracing::debug!("Unable to read IAR installation information from registry: {e}");
                return;
            }
        };

        for subkey in subkeys {
            tracing::debug!("Found IAR EWARM registry entry {subkey}.");

            if !is_version_key(&subkey) {
                continue;
            }
            let Some(version) = ToolchainVersion::parse(&subkey) else {
                continue;
            };

            let key = format!("{}\\{subkey}", self.versions_key);
            let install_path = match self.registry.string_value(&key, INSTALL_PATH_VALUE) {
                Ok(path) => PathBuf::from(path),
                Err(e) => {
                    tracing::debug!("Ignoring IAR EWARM {subkey}: no install path ({e}).");
                    continue;
                }
            };

            let root = filesystem::canonicalize(&install_path);
            tracing::debug!("Potential IAR ARM {subkey} install found at {}.", root.display());

            if !self.looks_like_install(&root) {
                tracing::debug!(
                    "Ignoring candidate IAR ARM directory {} as it does not look like an IAR ARM installation.",
                    root.display()
                );
                continue;
            }

            let name = format!("{REGISTRY_INSTALL_NAME_PREFIX} {subkey}");
            match self.build_install(&name, &root, version) {
                Some(install) => {
                    tracing::debug!("Found IAR ARM {subkey} at {}", root.display());
                    self.insert(root, install);
                }
                None => tracing::debug!(
                    "Ignoring IAR ARM {subkey} at {}: no architecture is fully installed.",
                    root.display()
                ),
            }
        }
    }

    fn locate_user_specified(&self, candidate: &Path) -> SearchResult {
        let root = filesystem::canonicalize(candidate);

        if let Some(install) = self.cached(&root) {
            return SearchResult::Found(install);
        }

        let rejected = || {
            SearchResult::not_found(format!(
                "The specified installation directory '{}' does not appear to contain an IAR Workbench installation.",
                candidate.display()
            ))
        };

        if !self.looks_like_install(&root) {
            tracing::debug!(
                "Ignoring candidate IAR ARM install for {} as it does not look like an IAR ARM installation.",
                candidate.display()
            );
            return rejected();
        }

        match self.build_install(USER_PROVIDED_INSTALL_NAME, &root, ToolchainVersion::Unknown) {
            Some(install) => SearchResult::Found(self.insert(root, install)),
            None => {
                tracing::debug!(
                    "Ignoring candidate IAR ARM install for {}: no architecture is fully installed.",
                    candidate.display()
                );
                rejected()
            }
        }
    }

    fn determine_default(&self) -> SearchResult {
        match self.sorted_installs().into_iter().next() {
            Some(install) => SearchResult::Found(install),
            None => SearchResult::not_found(NO_DEFAULT_INSTALL),
        }
    }

    /// Workbench-level and architecture-level shape checks
    fn looks_like_install(&self, root: &Path) -> bool {
        is_workbench(root) && self.profiles.iter().any(|profile| has_compiler(profile, root))
    }

    fn build_install(
        &self,
        name: &str,
        root: &Path,
        version: ToolchainVersion,
    ) -> Option<ToolchainInstall> {
        let descriptors: BTreeMap<_, _> = self
            .profiles
            .iter()
            .map(|profile| (profile.architecture(), profile.build(root, root)))
            .filter(|(_, descriptor)| descriptor.is_installed())
            .collect();

        if descriptors.is_empty() {
            return None;
        }
        Some(ToolchainInstall::new(name, version, root.to_path_buf(), descriptors))
    }

    fn cached(&self, root: &Path) -> Option<Arc<ToolchainInstall>> {
        self.installs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(root)
            .cloned()
    }

    /// Insert unless already present; the first entry for a root wins
    fn insert(&self, root: PathBuf, install: ToolchainInstall) -> Arc<ToolchainInstall> {
        let mut installs = self.installs.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(installs.entry(root).or_insert_with(|| Arc::new(install)))
    }

    fn sorted_installs(&self) -> Vec<Arc<ToolchainInstall>> {
        let mut installs: Vec<_> = self
            .installs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        installs.sort_by(|a, b| {
            b.version()
                .cmp(a.version())
                .then_with(|| a.root().cmp(b.root()))
        });
        installs
    }
}

fn is_workbench(root: &Path) -> bool {
    let workbench = root.join(COMMON_DIR);
    let exists = workbench.is_dir();
    if exists {
        tracing::debug!("Found IAR Workbench at {}", workbench.display());
    } else {
        tracing::debug!("Unable to find IAR Workbench at {}", workbench.display());
    }
    exists
}

fn has_compiler(profile: &ArchitectureProfile, root: &Path) -> bool {
    let compiler = profile.compiler_path(root);
    let exists = compiler.is_file();
    if exists {
        tracing::debug!("Found IAR {} compiler at {}", profile.architecture, compiler.display());
    } else {
        tracing::debug!(
            "Unable to find IAR {} compiler at {}",
            profile.architecture,
            compiler.display()
        );
    }
    exists
}
