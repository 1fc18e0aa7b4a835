//! Process environment access
//!
//! Tool configuration inspects inherited environment variables to warn about
//! values it overrides. Reading goes through [`EnvGetter`] so tests can supply
//! a fixed environment.

use std::collections::HashMap;

/// Source of environment variable values
pub trait EnvGetter {
    /// Value of `name`, if set; non-Unicode values are converted lossily
    fn get_env(&self, name: &str) -> Option<String>;
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvGetter for ProcessEnv {
    fn get_env(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

/// A fixed environment snapshot
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    #[must_use]
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvGetter for MapEnv {
    fn get_env(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
