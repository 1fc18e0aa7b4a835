//! Windows registry access
//!
//! Discovery only needs two registry operations: list the subkeys of a key
//! and read a string value. They sit behind the [`Registry`] trait so the
//! locator can run against an in-memory registry in tests and on hosts that
//! have no registry at all.
//!
//! All key paths are relative to `HKEY_LOCAL_MACHINE` and use `\` separators.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use crate::config::registry::LOCAL_MACHINE_HIVE;
use crate::error::RegistryError;

/// Read access to `HKEY_LOCAL_MACHINE`
pub trait Registry {
    /// Names of the immediate subkeys of `key`
    fn subkeys(&self, key: &str) -> Result<Vec<String>, RegistryError>;

    /// String value `name` stored under `key`
    fn string_value(&self, key: &str, name: &str) -> Result<String, RegistryError>;
}

impl<R: Registry + ?Sized> Registry for Box<R> {
    fn subkeys(&self, key: &str) -> Result<Vec<String>, RegistryError> {
        (**self).subkeys(key)
    }

    fn string_value(&self, key: &str, name: &str) -> Result<String, RegistryError> {
        (**self).string_value(key, name)
    }
}

/// Registry for the current host: `reg.exe` on Windows, empty elsewhere
pub fn host_registry() -> Box<dyn Registry + Send + Sync> {
    if cfg!(windows) {
        Box::new(RegQuery::new())
    } else {
        Box::new(NoRegistry)
    }
}

/// Registry of a host without one; every key is missing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl Registry for NoRegistry {
    fn subkeys(&self, key: &str) -> Result<Vec<String>, RegistryError> {
        Err(RegistryError::KeyNotFound {
            key: key.to_string(),
        })
    }

    fn string_value(&self, key: &str, _name: &str) -> Result<String, RegistryError> {
        Err(RegistryError::KeyNotFound {
            key: key.to_string(),
        })
    }
}

/// Registry held in memory
///
/// Key names keep the case they were created with; lookups ignore case like
/// the Windows registry does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    /// Lowercased key path to the stored key
    keys: BTreeMap<String, StoredKey>,
}

#[derive(Debug, Clone, Default)]
struct StoredKey {
    /// Name of the last path segment as created
    name: String,
    values: BTreeMap<String, String>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key (and its parents) without values
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.insert_key(key);
        self
    }

    /// Set a string value, creating the key if needed
    #[must_use]
    pub fn with_value(mut self, key: &str, name: &str, value: &str) -> Self {
        self.insert_key(key)
            .values
            .insert(name.to_string(), value.to_string());
        self
    }

    fn insert_key(&mut self, key: &str) -> &mut StoredKey {
        let mut path = String::new();
        for segment in key.trim_matches('\\').split('\\') {
            if !path.is_empty() {
                path.push('\\');
            }
            path.push_str(&segment.to_ascii_lowercase());
            self.keys.entry(path.clone()).or_insert_with(|| StoredKey {
                name: segment.to_string(),
                values: BTreeMap::new(),
            });
        }
        self.keys.entry(path).or_default()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim_matches('\\').to_ascii_lowercase()
}

impl Registry for InMemoryRegistry {
    fn subkeys(&self, key: &str) -> Result<Vec<String>, RegistryError> {
        let normalized = normalize_key(key);
        if !self.keys.contains_key(&normalized) {
            return Err(RegistryError::KeyNotFound {
                key: key.to_string(),
            });
        }
        let prefix = format!("{normalized}\\");
        Ok(self
            .keys
            .iter()
            .filter(|(candidate, _)| {
                candidate
                    .strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('\\'))
            })
            .map(|(_, stored)| stored.name.clone())
            .collect())
    }

    fn string_value(&self, key: &str, name: &str) -> Result<String, RegistryError> {
        let stored = self
            .keys
            .get(&normalize_key(key))
            .ok_or_else(|| RegistryError::KeyNotFound {
                key: key.to_string(),
            })?;
        stored
            .values
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ValueNotFound {
                key: key.to_string(),
                name: name.to_string(),
            })
    }
}

/// Registry read through the `reg.exe query` command
#[derive(Debug, Clone)]
pub struct RegQuery {
    program: PathBuf,
}

impl RegQuery {
    /// Use the `reg` executable found on `PATH`
    pub fn new() -> Self {
        let program = which::which("reg").unwrap_or_else(|_| PathBuf::from("reg"));
        Self { program }
    }

    fn query(&self, key: &str, value: Option<&str>) -> Result<Option<String>, RegistryError> {
        let full_key = format!("{LOCAL_MACHINE_HIVE}\\{key}");
        let mut cmd = Command::new(&self.program);
        cmd.arg("query").arg(&full_key);
        if let Some(name) = value {
            cmd.arg("/v").arg(name);
        }
        let output = cmd.output().map_err(|e| RegistryError::QueryFailed {
            key: key.to_string(),
            error: e.to_string(),
        })?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            tracing::debug!(
                "reg query {} failed: {}",
                full_key,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            Ok(None)
        }
    }
}

impl Default for RegQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for RegQuery {
    fn subkeys(&self, key: &str) -> Result<Vec<String>, RegistryError> {
        match self.query(key, None)? {
            Some(stdout) => Ok(parse_subkeys(&stdout, key)),
            None => Err(RegistryError::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    fn string_value(&self, key: &str, name: &str) -> Result<String, RegistryError> {
        if self.query(key, None)?.is_none() {
            return Err(RegistryError::KeyNotFound {
                key: key.to_string(),
            });
        }
        self.query(key, Some(name))?
            .and_then(|stdout| parse_string_value(&stdout, name))
            .ok_or_else(|| RegistryError::ValueNotFound {
                key: key.to_string(),
                name: name.to_string(),
            })
    }
}

/// Extract immediate subkey names from `reg query <key>` output
///
/// Subkeys are printed as full paths (`HKEY_LOCAL_MACHINE\...\<name>`), one
/// per line; value lines are indented and skipped.
pub fn parse_subkeys(stdout: &str, key: &str) -> Vec<String> {
    let suffix = format!("\\{}\\", normalize_key(key));
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| line.starts_with("HKEY_"))
        .filter_map(|line| {
            let lower = line.to_ascii_lowercase();
            let start = lower.find(&suffix)? + suffix.len();
            let name = &line[start..];
            (!name.is_empty() && !name.contains('\\')).then(|| name.to_string())
        })
        .collect()
}

/// Extract a `REG_SZ` / `REG_EXPAND_SZ` value from `reg query <key> /v <name>`
/// output
pub fn parse_string_value(stdout: &str, name: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        let trimmed = line.trim_start();
        let rest = trimmed.strip_prefix(name)?;
        let rest = rest.trim_start();
        let rest = rest
            .strip_prefix("REG_EXPAND_SZ")
            .or_else(|| rest.strip_prefix("REG_SZ"))?;
        Some(rest.trim().to_string())
    })
}
