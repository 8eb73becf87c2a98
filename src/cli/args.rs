//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with proper
//! validation and error handling.

use clap::Parser;
use std::path::PathBuf;

use crate::bundler::settings::DEFAULT_THRESHOLD;

/// Asset bundle builder for speech-recognition firmware
#[derive(Parser, Debug)]
#[command(
    name = "srassets_bundler",
    version,
    about = "Asset bundle builder for speech-recognition firmware",
    long_about = "Packs speech-model directories into a flash-mountable assets.bin.

Stages the requested multinet models in a scratch workspace, packs them into
srmodels.bin, derives the index.json manifest, and bundles everything into a
single assets.bin at the output path.

Usage:
  srassets_bundler --model-path vendor/esp-sr/model --models mn6_cn mn6_en --output build/assets.bin
  srassets_bundler --model-path vendor/esp-sr/model --models mn6_cn --cn-wake-word \u{4f60}\u{597d}\u{5c0f}\u{667a} --output assets.bin

Exit code 0 = bundle guaranteed to exist at the output path."
)]
pub struct Args {
    /// Path to the vendored model tree (multinet models live under its
    /// multinet_model/ directory)
    #[arg(short = 'm', long, value_name = "PATH")]
    pub model_path: PathBuf,

    /// Multinet model names to bundle, e.g. mn6_cn mn6_en
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub models: Vec<String>,

    /// Output path for the created assets.bin
    ///
    /// Parent directories are created if they don't exist.
    ///
    /// Contract: Exit code 0 guarantees the bundle exists at this path.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: PathBuf,

    /// Chinese wake phrase (optional; omit to configure at runtime)
    #[arg(long, value_name = "PHRASE")]
    pub cn_wake_word: Option<String>,

    /// English wake phrase (optional; omit to configure at runtime)
    #[arg(long, value_name = "PHRASE")]
    pub en_wake_word: Option<String>,

    /// Detection threshold (0.0-1.0)
    #[arg(short, long, value_name = "FLOAT", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.models.is_empty() {
            return Err("At least one model name is required".to_string());
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!(
                "Invalid threshold: {} (expected 0.0-1.0)",
                self.threshold
            ));
        }

        Ok(())
    }
}
