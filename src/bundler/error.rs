//! Error types for build operations.
//!
//! This module defines the domain error enum shared by the container and
//! bundle builders, plus the context helpers used to attach failing paths
//! to low-level I/O errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while assembling containers and bundles.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO error with the failing path attached
    #[error("I/O error while {action} at {}: {source}", .path.display())]
    PathIoError {
        /// What was being attempted
        action: String,
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Source path does not exist
    #[error("source path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Model root contained no model subdirectories
    #[error("no model directories found under {}", .0.display())]
    NoModelsFound(PathBuf),

    /// Serialized header does not match the precomputed layout.
    ///
    /// This indicates a defect in the offset algorithm itself and is never
    /// silently corrected.
    #[error("container header layout mismatch: wrote {actual} bytes, expected {expected}")]
    LayoutInconsistency {
        /// Precomputed header length
        expected: usize,
        /// Actual serialized length
        actual: usize,
    },

    /// A value did not fit the fixed-width binary field
    #[error("value out of range for {field}: {value}")]
    FieldOverflow {
        /// Binary field name
        field: &'static str,
        /// Offending value
        value: u64,
    },

    /// Name bytes in a fixed-width field were not valid UTF-8
    #[error("invalid UTF-8 in encoded name: {0}")]
    InvalidName(#[from] std::str::Utf8Error),

    /// An artifact the build already produced is missing at finalize time
    #[error("expected artifact missing after build: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Bail out of the current function with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

/// Attach a static message to `None` / error values.
pub trait Context<T> {
    /// Convert into a [`Result`], using `msg` as the error text.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Attach the failing path and action to filesystem errors.
pub trait ErrorExt<T> {
    /// Wrap an `io::Error` as [`Error::PathIoError`].
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::PathIoError {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
