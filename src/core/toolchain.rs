//! The IAR tool chain
//!
//! [`IarToolChain`] is what a build talks to: it decides once whether IAR is
//! usable on this host, then hands out configured tools per target platform.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::config::defaults::{DEFAULT_TOOLCHAIN_NAME, TOOLCHAIN_TYPE_NAME};
use crate::core::install::ToolchainInstall;
use crate::core::locator::WorkbenchLocator;
use crate::core::platform::{OperatingSystem, TargetPlatform};
use crate::core::search::{Availability, Explanation};
use crate::core::tool_provider::{PlatformToolChainConfig, PlatformToolProvider, PlatformTools};
use crate::infra::environment::{EnvGetter, ProcessEnv};
use crate::infra::registry::Registry;

/// Reason given on non-Windows hosts
pub const UNSUPPORTED_HOST: &str = "IAR is not available on this operating system.";

/// Action run against every platform configuration
pub type PlatformAction = Box<dyn Fn(&mut PlatformToolChainConfig) + Send + Sync>;

/// Outcome of selecting tools for a platform
#[derive(Debug)]
pub enum PlatformToolSelection {
    Available(Box<PlatformTools>),
    Unavailable(Explanation),
}

impl PlatformToolSelection {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// The tools, if available
    pub fn tools(&self) -> Option<&PlatformTools> {
        match self {
            Self::Available(tools) => Some(tools.as_ref()),
            Self::Unavailable(_) => None,
        }
    }

    /// Why tools are unavailable; `None` when available
    pub fn explanation(&self) -> Option<&Explanation> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(explanation) => Some(explanation),
        }
    }
}

struct Located {
    availability: Availability,
    install: Option<Arc<ToolchainInstall>>,
}

/// IAR Embedded Workbench for ARM as a build tool chain
pub struct IarToolChain<R> {
    name: String,
    operating_system: OperatingSystem,
    install_dir: Option<PathBuf>,
    locator: Arc<WorkbenchLocator<R>>,
    env: Box<dyn EnvGetter + Send + Sync>,
    platform_actions: Vec<PlatformAction>,
    located: OnceLock<Located>,
}

impl<R: Registry> IarToolChain<R> {
    /// Tool chain named `name` on the current host
    pub fn new(name: &str, locator: Arc<WorkbenchLocator<R>>) -> Self {
        Self {
            name: name.to_string(),
            operating_system: OperatingSystem::current(),
            install_dir: None,
            locator,
            env: Box::new(ProcessEnv),
            platform_actions: Vec::new(),
            located: OnceLock::new(),
        }
    }

    /// Tool chain with the default name
    pub fn with_default_name(locator: Arc<WorkbenchLocator<R>>) -> Self {
        Self::new(DEFAULT_TOOLCHAIN_NAME, locator)
    }

    /// Pretend to run on `operating_system`
    #[must_use]
    pub fn with_host(mut self, operating_system: OperatingSystem) -> Self {
        self.operating_system = operating_system;
        self.located = OnceLock::new();
        self
    }

    /// Read inherited environment variables from `env`
    #[must_use]
    pub fn with_env(mut self, env: impl EnvGetter + Send + Sync + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn type_name(&self) -> &'static str {
        TOOLCHAIN_TYPE_NAME
    }

    pub fn install_dir(&self) -> Option<&Path> {
        self.install_dir.as_deref()
    }

    /// Point at a specific install; forgets any earlier availability check
    pub fn set_install_dir(&mut self, dir: Option<PathBuf>) {
        self.install_dir = dir;
        self.located = OnceLock::new();
    }

    /// Register an action configuring the tools of every platform
    pub fn each_platform(&mut self, action: impl Fn(&mut PlatformToolChainConfig) + Send + Sync + 'static) {
        self.platform_actions.push(Box::new(action));
    }

    /// Whether this tool chain can be used at all
    pub fn availability(&self) -> &Availability {
        &self.locate().availability
    }

    /// The selected install, once available
    pub fn install(&self) -> Option<&Arc<ToolchainInstall>> {
        self.locate().install.as_ref()
    }

    fn locate(&self) -> &Located {
        self.located.get_or_init(|| {
            let mut availability = Availability::new();
            if !self.operating_system.is_windows() {
                availability.unavailable(UNSUPPORTED_HOST);
                return Located {
                    availability,
                    install: None,
                };
            }

            let result = self.locator.locate_default(self.install_dir.as_deref());
            availability.must_be_available(&result);
            let install = result.install().cloned();
            if let Some(install) = &install {
                tracing::info!("{} uses {} at {}", self, install.name(), install.root().display());
            }
            Located {
                availability,
                install,
            }
        })
    }

    /// Configured tools for `platform`, or every reason they are unavailable
    pub fn select(&self, platform: &TargetPlatform) -> PlatformToolSelection {
        let located = self.locate();
        let mut availability = Availability::new();
        availability.must_be_available_from(&located.availability);

        let install = match &located.install {
            Some(install) if install.is_supported_platform(platform) => install,
            Some(_) => {
                availability.unavailable(format!(
                    "Don't know how to build for platform '{}'.",
                    platform.name()
                ));
                return PlatformToolSelection::Unavailable(availability.explanation().clone());
            }
            None => return PlatformToolSelection::Unavailable(availability.explanation().clone()),
        };

        let mut config = PlatformToolChainConfig::new(platform.clone());
        for action in &self.platform_actions {
            action(&mut config);
        }

        match PlatformToolProvider::new(self.env.as_ref()).configure(install, platform, &config) {
            Ok(tools) => PlatformToolSelection::Available(Box::new(tools)),
            Err(e) => {
                availability.unavailable(e.to_string());
                PlatformToolSelection::Unavailable(availability.explanation().clone())
            }
        }
    }
}

impl<R> fmt::Display for IarToolChain<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tool chain '{}' ({})", self.name, TOOLCHAIN_TYPE_NAME)
    }
}
