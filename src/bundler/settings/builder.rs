//! Builder for constructing BuildSettings.

use super::core::DEFAULT_THRESHOLD;
use super::{BuildSettings, WakePhrases};
use crate::bundler::error::Context;
use crate::manifest::DEFAULT_DURATION_MS;
use std::path::{Path, PathBuf};

/// Builder for constructing [`BuildSettings`].
///
/// Provides a fluent API for building settings with validation.
///
/// # Examples
///
/// ```no_run
/// use srassets_bundler::bundler::{BuildSettingsBuilder, WakePhrases};
///
/// # fn example() -> srassets_bundler::bundler::Result<()> {
/// let settings = BuildSettingsBuilder::new()
///     .model_base_dir("vendor/esp-sr/model")
///     .model_names(vec!["mn6_cn".into()])
///     .output_path("build/assets.bin")
///     .wake_phrases(WakePhrases {
///         cn: Some("\u{4f60}\u{597d}\u{5c0f}\u{667a}".into()),
///         en: None,
///     })
///     .threshold(0.35)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct BuildSettingsBuilder {
    model_base_dir: Option<PathBuf>,
    model_names: Vec<String>,
    output_path: Option<PathBuf>,
    wake_phrases: WakePhrases,
    threshold: Option<f32>,
    duration_ms: Option<u32>,
    skip_files: Option<Vec<String>>,
}

impl BuildSettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the model base directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn model_base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.model_base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the model names to bundle.
    ///
    /// # Required
    ///
    /// At least one name is required for building.
    pub fn model_names(mut self, names: Vec<String>) -> Self {
        self.model_names = names;
        self
    }

    /// Sets the destination path for the finished bundle.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the wake phrases.
    ///
    /// Default: none (commands configured at runtime)
    pub fn wake_phrases(mut self, wake_phrases: WakePhrases) -> Self {
        self.wake_phrases = wake_phrases;
        self
    }

    /// Sets the detection threshold.
    ///
    /// Default: 0.2
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the command-detection window in milliseconds.
    ///
    /// Default: 3000
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the control files excluded from bundling.
    ///
    /// Default: `["config.json"]`
    pub fn skip_files(mut self, skip_files: Vec<String>) -> Self {
        self.skip_files = Some(skip_files);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `model_base_dir`
    /// - `model_names` (at least one)
    /// - `output_path`
    pub fn build(self) -> crate::bundler::Result<BuildSettings> {
        if self.model_names.is_empty() {
            crate::bail!("at least one model name is required");
        }

        Ok(BuildSettings::new(
            self.model_base_dir.context("model_base_dir is required")?,
            self.model_names,
            self.output_path.context("output_path is required")?,
            self.wake_phrases,
            self.threshold.unwrap_or(DEFAULT_THRESHOLD),
            self.duration_ms.unwrap_or(DEFAULT_DURATION_MS),
            self.skip_files
                .unwrap_or_else(|| vec!["config.json".to_string()]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let settings = BuildSettingsBuilder::new()
            .model_base_dir("/models")
            .model_names(vec!["mn6_cn".into()])
            .output_path("/out/assets.bin")
            .build()
            .unwrap();
        assert!((settings.threshold() - DEFAULT_THRESHOLD).abs() < f32::EPSILON);
        assert_eq!(settings.duration_ms(), DEFAULT_DURATION_MS);
        assert_eq!(settings.skip_files(), ["config.json"]);
        assert!(settings.wake_phrases().cn.is_none());
    }

    #[test]
    fn missing_required_fields_error() {
        let err = BuildSettingsBuilder::new()
            .model_names(vec!["mn6_cn".into()])
            .output_path("/out/assets.bin")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("model_base_dir"));

        let err = BuildSettingsBuilder::new()
            .model_base_dir("/models")
            .output_path("/out/assets.bin")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("model name"));
    }
}
