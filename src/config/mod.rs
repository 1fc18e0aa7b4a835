//! Configuration constants
//!
//! - [`defaults`] - Default names, file extensions and environment settings
//! - [`registry`] - Registry locations probed during discovery

pub mod defaults;
pub mod registry;
