//! Main build orchestration and coordination.
//!
//! This module provides the [`BuildOrchestrator`] that sequences model
//! staging, container packing, manifest generation, and bundle assembly
//! against a private scratch workspace.

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::format::{AssetBundleBuilder, MODEL_CONTAINER_FILE, ModelContainerBuilder};
use crate::bundler::settings::BuildSettings;
use crate::bundler::utils::fs as fs_utils;
use crate::manifest::{BundleManifest, MANIFEST_FILE};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Model families that require the grammar model alongside them.
const NEEDS_FST_MARKERS: [&str; 2] = ["mn6", "mn7"];

/// Build steps, in execution order.
///
/// Every step can fail; the orchestrator logs which one did before
/// propagating the error. Workspace teardown runs exactly once on every
/// exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// Scratch workspace acquisition
    Init,

    /// Resolving and staging requested model directories
    CollectModels,

    /// Packing staged models into `srmodels.bin`
    BuildModelContainer,

    /// Deriving and writing `index.json`
    GenerateManifest,

    /// Packing the asset directory into `assets.bin`
    BuildAssetBundle,

    /// Copying the bundle to its destination
    Finalize,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStep::Init => "init",
            BuildStep::CollectModels => "collect-models",
            BuildStep::BuildModelContainer => "build-model-container",
            BuildStep::GenerateManifest => "generate-manifest",
            BuildStep::BuildAssetBundle => "build-asset-bundle",
            BuildStep::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Destination path of the finished bundle
    pub output_path: PathBuf,

    /// Bundle size in bytes
    pub size: u64,

    /// Number of files in the bundle
    pub total_files: u32,

    /// Names of the staged models, in staging order
    pub models: Vec<String>,
}

/// Sequences a full bundle build against a scratch workspace.
///
/// # Examples
///
/// ```no_run
/// use srassets_bundler::bundler::{BuildOrchestrator, BuildSettingsBuilder};
///
/// # fn example() -> srassets_bundler::bundler::Result<()> {
/// let settings = BuildSettingsBuilder::new()
///     .model_base_dir("vendor/esp-sr/model")
///     .model_names(vec!["mn6_cn".into()])
///     .output_path("build/assets.bin")
///     .build()?;
///
/// let report = BuildOrchestrator::new(settings).build()?;
/// println!("{} ({} bytes)", report.output_path.display(), report.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BuildOrchestrator {
    settings: BuildSettings,
}

impl BuildOrchestrator {
    /// Creates a new orchestrator with the given settings.
    pub fn new(settings: BuildSettings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the build settings.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Runs the full build.
    ///
    /// Acquires a scratch workspace, runs every step in order, and copies
    /// the finished bundle to the configured output path. The workspace is
    /// torn down exactly once whether the build succeeds or fails; no
    /// partial output is left at the destination on failure.
    pub fn build(&self) -> Result<BuildReport> {
        let mut step = BuildStep::Init;
        log::info!("step: {step}");

        // Scoped acquisition: dropping the TempDir tears the workspace
        // down on every exit path, including mid-step failures.
        let workspace = tempfile::Builder::new()
            .prefix("srassets-build-")
            .tempdir()
            .map_err(Error::IoError)?;
        log::debug!("scratch workspace: {}", workspace.path().display());

        let result = self.run_steps(workspace.path(), &mut step);
        match result {
            Ok(report) => {
                // Surface cleanup problems on the success path instead of
                // discarding them in Drop.
                if let Err(e) = workspace.close() {
                    log::warn!("scratch workspace cleanup failed: {e}");
                }
                Ok(report)
            }
            Err(e) => {
                log::error!("build failed during {step}: {e}");
                Err(e)
            }
        }
    }

    /// Runs all steps after Init, recording the current step in `step`.
    fn run_steps(&self, workspace: &Path, step: &mut BuildStep) -> Result<BuildReport> {
        let assets_dir = workspace.join("assets");
        fs_utils::create_dir_all(&assets_dir, false)?;

        *step = BuildStep::CollectModels;
        log::info!("step: {step}");
        let (stage_dir, staged_models) = self.collect_models(workspace)?;

        *step = BuildStep::BuildModelContainer;
        log::info!("step: {step}");
        let container_path = ModelContainerBuilder::new(&stage_dir).build()?;
        fs_utils::copy_file(&container_path, &assets_dir.join(MODEL_CONTAINER_FILE))?;

        *step = BuildStep::GenerateManifest;
        log::info!("step: {step}");
        let manifest = BundleManifest::derive(
            &staged_models,
            Some(MODEL_CONTAINER_FILE.to_string()),
            self.settings.wake_phrases(),
            self.settings.threshold(),
            self.settings.duration_ms(),
        );
        manifest.write(&assets_dir.join(MANIFEST_FILE))?;

        *step = BuildStep::BuildAssetBundle;
        log::info!("step: {step}");
        let bundle_path = workspace.join("output").join("assets.bin");
        let bundled = AssetBundleBuilder::new(&assets_dir)
            .skip_files(self.settings.skip_files().to_vec())
            .build(&bundle_path)?;

        *step = BuildStep::Finalize;
        log::info!("step: {step}");
        // The builder just reported this path; its absence now is not a
        // user error but a defect in the build itself.
        if !bundled.path.exists() {
            return Err(Error::MissingArtifact(bundled.path));
        }
        let output_path = self.settings.output_path();
        fs_utils::copy_file(&bundled.path, output_path)?;

        let size = fs::metadata(output_path)
            .fs_context("reading bundle metadata", output_path)?
            .len();
        log::info!(
            "bundle ready: {} ({:.2} KiB, {} files)",
            output_path.display(),
            size as f64 / 1024.0,
            bundled.total_files
        );

        Ok(BuildReport {
            output_path: output_path.to_path_buf(),
            size,
            total_files: bundled.total_files,
            models: staged_models,
        })
    }

    /// Resolves requested model names and stages them into the workspace.
    ///
    /// Names that do not resolve under the multinet model directory are
    /// warned about and skipped; zero resolved names is a hard failure.
    /// Models of the `mn6`/`mn7` families pull in the `fst` grammar model
    /// automatically.
    fn collect_models(&self, workspace: &Path) -> Result<(PathBuf, Vec<String>)> {
        let multinet_dir = self.settings.multinet_model_dir();

        let mut resolved = Vec::new();
        for name in self.settings.model_names() {
            let model_dir = multinet_dir.join(name);
            if model_dir.exists() {
                log::info!("found model: {name}");
                resolved.push((name.clone(), model_dir));
            } else {
                log::warn!("model directory does not exist: {}", model_dir.display());
            }
        }
        if resolved.is_empty() {
            return Err(Error::NoModelsFound(multinet_dir));
        }

        let stage_dir = workspace.join("srmodels");
        fs_utils::create_dir_all(&stage_dir, true)?;

        let mut staged = Vec::new();
        let mut needs_fst = false;
        for (name, model_dir) in resolved {
            fs_utils::copy_dir(&model_dir, &stage_dir.join(&name))?;
            needs_fst |= NEEDS_FST_MARKERS.iter().any(|marker| name.contains(marker));
            staged.push(name);
        }

        if needs_fst {
            let fst_dir = multinet_dir.join("fst");
            if fst_dir.exists() {
                fs_utils::copy_dir(&fst_dir, &stage_dir.join("fst"))?;
                log::info!("added fst grammar model");
                staged.push("fst".to_string());
            } else {
                log::warn!(
                    "fst model directory not found: {}; mn6/mn7 models may not work",
                    fst_dir.display()
                );
            }
        }

        Ok((stage_dir, staged))
    }
}
