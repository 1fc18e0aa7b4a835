//! Error types for iarchain
//!
//! Domain-specific error types using thiserror.
//!
//! Expected "toolchain unavailable" outcomes are not errors: they are reported
//! through [`crate::core::search::SearchResult::NotFound`]. The types here cover
//! programming errors on an already-located install and environment failures.

use std::path::PathBuf;
use thiserror::Error;

/// Registry access errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Registry key does not exist
    #[error("Registry key not found: {key}")]
    KeyNotFound { key: String },

    /// Registry value does not exist under an existing key
    #[error("Registry value '{name}' not found under {key}")]
    ValueNotFound { key: String, name: String },

    /// The registry could not be queried at all
    #[error("Failed to query registry key {key}: {error}")]
    QueryFailed { key: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to resolve a path
    #[error("Failed to resolve path '{path}': {error}")]
    ResolvePath { path: PathBuf, error: String },
}

/// Errors raised while configuring tools for an already-located install
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// The install has no descriptor for the requested platform
    #[error("Toolchain '{toolchain}' cannot build for platform '{platform}'")]
    UnsupportedPlatform { toolchain: String, platform: String },

    /// Writing a response file failed
    #[error("Could not write options file '{path}': {error}")]
    ResponseFileWrite { path: PathBuf, error: String },

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
