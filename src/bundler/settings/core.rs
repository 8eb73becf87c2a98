//! Core BuildSettings struct and implementations.

use std::path::{Path, PathBuf};

/// Default detection threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Optional wake phrases per supported language.
///
/// An unset (or whitespace-only) phrase means "configure at runtime" and
/// keeps the corresponding command list out of the manifest.
#[derive(Debug, Clone, Default)]
pub struct WakePhrases {
    /// Chinese wake phrase
    pub cn: Option<String>,

    /// English wake phrase
    pub en: Option<String>,
}

/// Main settings for a bundle build.
///
/// Central configuration for the orchestrator, constructed via
/// [`BuildSettingsBuilder`](super::BuildSettingsBuilder). Contains the
/// model source location, the requested model set, and manifest options.
///
/// # Examples
///
/// ```no_run
/// use srassets_bundler::bundler::BuildSettingsBuilder;
///
/// # fn example() -> srassets_bundler::bundler::Result<()> {
/// let settings = BuildSettingsBuilder::new()
///     .model_base_dir("vendor/esp-sr/model")
///     .model_names(vec!["mn6_cn".into(), "mn6_en".into()])
///     .output_path("build/assets.bin")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BuildSettings {
    /// Root of the vendored model tree.
    ///
    /// Multi-command models live under `<model_base_dir>/multinet_model/`.
    model_base_dir: PathBuf,

    /// Names of the models to bundle, in request order.
    model_names: Vec<String>,

    /// Destination path for the finished `assets.bin`.
    output_path: PathBuf,

    /// Optional wake phrases per language.
    wake_phrases: WakePhrases,

    /// Detection threshold (0.0-1.0).
    threshold: f32,

    /// Command-detection window in milliseconds.
    duration_ms: u32,

    /// Control files excluded from the asset bundle.
    skip_files: Vec<String>,
}

impl BuildSettings {
    /// Returns the model base directory.
    pub fn model_base_dir(&self) -> &Path {
        &self.model_base_dir
    }

    /// Returns the directory holding multi-command models.
    pub fn multinet_model_dir(&self) -> PathBuf {
        self.model_base_dir.join("multinet_model")
    }

    /// Returns the requested model names, in request order.
    pub fn model_names(&self) -> &[String] {
        &self.model_names
    }

    /// Returns the destination path for the finished bundle.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns the configured wake phrases.
    pub fn wake_phrases(&self) -> &WakePhrases {
        &self.wake_phrases
    }

    /// Returns the detection threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns the command-detection window in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Returns the control files excluded from bundling.
    pub fn skip_files(&self) -> &[String] {
        &self.skip_files
    }

    /// Creates a new BuildSettings instance (used by BuildSettingsBuilder).
    pub(super) fn new(
        model_base_dir: PathBuf,
        model_names: Vec<String>,
        output_path: PathBuf,
        wake_phrases: WakePhrases,
        threshold: f32,
        duration_ms: u32,
        skip_files: Vec<String>,
    ) -> Self {
        Self {
            model_base_dir,
            model_names,
            output_path,
            wake_phrases,
            threshold,
            duration_ms,
            skip_files,
        }
    }
}
