//! Default configuration values

/// Default tool chain name
pub const DEFAULT_TOOLCHAIN_NAME: &str = "iarArm";

/// Tool chain type name used in display names
pub const TOOLCHAIN_TYPE_NAME: &str = "IAR";

/// Name given to installs located from a user-supplied directory
pub const USER_PROVIDED_INSTALL_NAME: &str = "IAR ARM from user provided path";

/// Prefix of names given to installs found in the registry
pub const REGISTRY_INSTALL_NAME_PREFIX: &str = "IAR ARM";

/// Workbench-level directory every install root must contain
pub const COMMON_DIR: &str = "common";

/// Shared runtime binaries, relative to the install root
pub const COMMON_BIN_DIR: &str = "common/bin";

/// Object file extension produced by the compiler and assembler
pub const OBJECT_FILE_EXTENSION: &str = ".o";

/// Static library extension
pub const STATIC_LIBRARY_EXTENSION: &str = ".a";

/// Executable extension
pub const EXECUTABLE_EXTENSION: &str = ".out";

/// Flag telling IAR tools to read arguments from a file
pub const RESPONSE_FILE_FLAG: &str = "-f";

/// Inherited environment variables that change how the IAR tools behave.
///
/// They are overridden to the empty string in every invocation.
pub const CLEARED_ENVIRONMENT_VARIABLES: &[&str] = &["INCLUDE", "CL", "LIBPATH", "LINK", "LIB"];

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
