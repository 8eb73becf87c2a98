//! Command line interface for the asset bundler.
//!
//! This module wires argument parsing to the build orchestrator and
//! converts build results into a process exit code.

mod args;

pub use args::Args;

use crate::bundler::{BuildOrchestrator, BuildSettingsBuilder, WakePhrases};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with_args(args)
}

/// Runs a build for already-parsed arguments.
pub fn run_with_args(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    log::info!("model path: {}", args.model_path.display());
    log::info!("models: {}", args.models.join(", "));
    log::info!("output: {}", args.output.display());
    log::info!("threshold: {}", args.threshold);

    let settings = BuildSettingsBuilder::new()
        .model_base_dir(&args.model_path)
        .model_names(args.models.clone())
        .output_path(&args.output)
        .wake_phrases(WakePhrases {
            cn: args.cn_wake_word.clone(),
            en: args.en_wake_word.clone(),
        })
        .threshold(args.threshold)
        .build()?;

    let report = BuildOrchestrator::new(settings).build()?;

    println!(
        "assets bundle: {} ({:.2} KiB, {} files)",
        report.output_path.display(),
        report.size as f64 / 1024.0,
        report.total_files
    );
    Ok(0)
}
