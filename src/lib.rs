//! iarchain - IAR Embedded Workbench toolchain discovery
//!
//! This library locates installed IAR Embedded Workbench for ARM toolchains,
//! validates their layout, and builds ready-to-run invocations of the
//! compiler, assembler, linker and archiver for a target platform.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Discovery, selection and tool configuration logic
//! - [`infra`] - Infrastructure layer (registry, filesystem, environment)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
