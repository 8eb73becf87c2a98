//! Build orchestration and coordination.
//!
//! This module provides the main [`BuildOrchestrator`] that sequences the
//! container and bundle builders against a scratch workspace.
//!
//! # Overview
//!
//! The orchestrator:
//! 1. Reads configuration from [`BuildSettings`](super::BuildSettings)
//! 2. Resolves and stages the requested model directories
//! 3. Packs the model container and derives the manifest
//! 4. Packs the asset bundle and copies it to the destination
//! 5. Returns a [`BuildReport`] with the final size
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`BuildOrchestrator`] struct and build steps

mod orchestrator;

pub use orchestrator::{BuildOrchestrator, BuildReport, BuildStep};
