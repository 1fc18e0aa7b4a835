//! Registry locations

/// Key listing one subkey per installed EWARM version, under `HKEY_LOCAL_MACHINE`
pub const EWARM_VERSIONS_KEY: &str =
    r"SOFTWARE\Wow6432Node\IAR Systems\Embedded Workbench\5.0\EWARM";

/// Value holding the install directory of one EWARM version
pub const INSTALL_PATH_VALUE: &str = "InstallPath";

/// Hive prefix used when querying `reg.exe`
pub const LOCAL_MACHINE_HIVE: &str = "HKLM";
