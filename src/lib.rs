//! Asset bundle builder for speech-recognition firmware.
//!
//! This library packs heterogeneous binary resources into single-file
//! containers a device can map directly from flash:
//! - a model container (`srmodels.bin`) bundling named model directories
//! - an asset bundle (`assets.bin`) embedding the model container plus a
//!   JSON manifest behind a sorted index table
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
