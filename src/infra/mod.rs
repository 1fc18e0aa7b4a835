//! Infrastructure layer
//!
//! Handles all interaction with the host: registry, filesystem, environment
//! and configuration directories.

pub mod dirs;
pub mod environment;
pub mod filesystem;
pub mod registry;
