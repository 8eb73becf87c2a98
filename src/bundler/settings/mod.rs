//! Configuration structures for build operations.
//!
//! This module provides the configuration types consumed by the build
//! orchestrator: source model location, output destination, wake-phrase
//! options, and the builder pattern for constructing them.

mod builder;
mod core;

// Re-export all public types
pub use builder::BuildSettingsBuilder;
pub use core::{BuildSettings, DEFAULT_THRESHOLD, WakePhrases};
