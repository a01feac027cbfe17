//! Error types for distfix
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::domain::ports::command_runner::TIMEOUT_MARKER;

/// Result type alias for finalizer operations
pub type FinalizeResult<T> = Result<T, FinalizeError>;

/// A filesystem failure during the directory merge.
///
/// `path` is the entry being removed, copied or renamed when the error hit.
#[derive(Error, Debug)]
#[error("error moving files at {path}: {source}")]
pub struct MergeError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl MergeError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Main error type for the finalize pipeline
#[derive(Error, Debug)]
pub enum FinalizeError {
    /// Removing a previous output root failed
    #[error("failed to clean {path}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build tool could not be started at all
    #[error("failed to start build command `{command}`: {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The build tool exited non-zero
    #[error("build failed: {}", stderr.trim())]
    BuildFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The build tool outlived its timeout
    #[error("build timed out after {}s: `{command}`", timeout.as_secs())]
    BuildTimedOut { command: String, timeout: Duration },

    /// Nested output directory absent after the build
    #[error("{} directory not found", path.display())]
    NestedMissing { path: PathBuf },

    /// Nested directory configured outside the output root
    #[error("{} is not a directory inside {}", path.display(), root.display())]
    NestedOutsideRoot { path: PathBuf, root: PathBuf },

    /// Relocating entries out of the nested directory failed
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Marker file absent at the output root
    #[error("{} not found in {} root", marker, root.display())]
    MarkerMissing {
        root: PathBuf,
        marker: String,
    },

    /// Removing a server artifact from the output root failed
    #[error("failed to remove server file {path}: {source}")]
    Strip {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing the output root failed
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FinalizeError {
    /// Captured stderr of a failed build, if any
    pub fn build_stderr(&self) -> Option<&str> {
        match self {
            FinalizeError::BuildFailed { stderr, .. } => Some(stderr.as_str()),
            FinalizeError::BuildTimedOut { .. } => Some(TIMEOUT_MARKER),
            _ => None,
        }
    }
}
