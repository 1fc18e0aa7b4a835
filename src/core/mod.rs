//! Core logic
//!
//! Discovery, validation and tool configuration for IAR Embedded Workbench.
//! Host access (registry, filesystem, environment) goes through
//! [`crate::infra`].
//!
//! # Submodules
//!
//! - [`platform`] - Target operating systems and architectures
//! - [`version`] - Toolchain version parsing and ordering
//! - [`descriptor`] - Per-architecture install layout
//! - [`install`] - Located toolchain installs
//! - [`search`] - Search results and availability explanations
//! - [`locator`] - Registry and user-path discovery
//! - [`args`] - Argument rendering and response files
//! - [`build_spec`] - Compile, link and archive inputs
//! - [`tool_provider`] - Per-platform tool configuration
//! - [`toolchain`] - The IAR tool chain
//! - [`settings`] - User settings file

pub mod args;
pub mod build_spec;
pub mod descriptor;
pub mod install;
pub mod locator;
pub mod platform;
pub mod search;
pub mod settings;
pub mod tool_provider;
pub mod toolchain;
pub mod version;
