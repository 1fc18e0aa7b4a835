//! Toolchain version handling
//!
//! This module handles:
//! - Recognising registry subkeys that name an installed version
//! - Numeric dotted ordering of versions (`2.10.0` is newer than `2.9.9`)
//! - The `Unknown` sentinel for installs located from a user-supplied path

use regex::Regex;
use semver::Version;
use std::fmt;
use std::sync::OnceLock;

/// Current iarchain version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

fn version_key_regex() -> &'static Regex {
    static VERSION_KEY: OnceLock<Regex> = OnceLock::new();
    VERSION_KEY.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid version key regex"))
}

/// Check whether a registry subkey name has the `major.minor.patch` shape
pub fn is_version_key(key: &str) -> bool {
    version_key_regex().is_match(key)
}

/// Version of a toolchain install
///
/// `Unknown` orders below every known version, so an explicitly located
/// install never outranks a registry install in a sorted listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolchainVersion {
    /// No version could be determined
    Unknown,
    /// A dotted numeric version
    Known(Version),
}

impl ToolchainVersion {
    /// Parse a `major.minor.patch` string
    ///
    /// Returns `None` when the string does not have the strict three-number
    /// shape or a component does not fit in a `u64`. Leading zeros are
    /// accepted and compare numerically.
    pub fn parse(input: &str) -> Option<Self> {
        if !is_version_key(input) {
            return None;
        }
        let mut parts = input.split('.').map(str::parse::<u64>);
        let major = parts.next()?.ok()?;
        let minor = parts.next()?.ok()?;
        let patch = parts.next()?.ok()?;
        Some(Self::Known(Version::new(major, minor, patch)))
    }

    /// Whether this is the `Unknown` sentinel
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Known(version) => write!(f, "{version}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::generators::version_key;
    use proptest::prelude::*;

    #[test]
    fn test_version_key_shape() {
        assert!(is_version_key("8.40.1"));
        assert!(is_version_key("10.0.0"));
        assert!(!is_version_key("8.40"));
        assert!(!is_version_key("8.40.1.2"));
        assert!(!is_version_key("v8.40.1"));
        assert!(!is_version_key("Settings"));
        assert!(!is_version_key(""));
    }

    #[test]
    fn test_numeric_ordering() {
        let newer = ToolchainVersion::parse("2.10.0").unwrap();
        let older = ToolchainVersion::parse("2.9.9").unwrap();
        assert!(newer > older);
    }

    #[test]
    fn test_unknown_ranks_lowest() {
        let known = ToolchainVersion::parse("0.0.0").unwrap();
        assert!(ToolchainVersion::Unknown < known);
        assert!(ToolchainVersion::Unknown.is_unknown());
        assert_eq!(ToolchainVersion::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_leading_zeros_compare_numerically() {
        assert_eq!(
            ToolchainVersion::parse("08.010.1"),
            ToolchainVersion::parse("8.10.1")
        );
    }

    #[test]
    fn test_overflowing_component_is_rejected() {
        assert_eq!(ToolchainVersion::parse("99999999999999999999.0.0"), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_ordering_matches_numeric_tuples(a in version_key(), b in version_key()) {
            let tuple = |s: &str| -> (u64, u64, u64) {
                let parts: Vec<u64> = s.split('.').map(|p| p.parse().unwrap()).collect();
                (parts[0], parts[1], parts[2])
            };
            let va = ToolchainVersion::parse(&a).unwrap();
            let vb = ToolchainVersion::parse(&b).unwrap();
            prop_assert_eq!(va.cmp(&vb), tuple(&a).cmp(&tuple(&b)));
        }

        #[test]
        fn prop_display_round_trips(key in version_key()) {
            let version = ToolchainVersion::parse(&key).unwrap();
            prop_assert_eq!(ToolchainVersion::parse(&version.to_string()), Some(version));
        }
    }
}
