//! Error types for teardownm operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A missing prerequisite is not an error: it is reported by the verifier
//!   and folded into the aggregate gate
//! - `SetupError` covers the conditions that stop the whole run
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for teardownm operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Configuration parsed but holds invalid values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Not every prerequisite passed.
    #[error("Prerequisites not satisfied ({passed}/{total} passed)")]
    PrerequisitesUnsatisfied { passed: usize, total: usize },

    /// Cloning a repository into a working directory failed.
    #[error("Failed to fetch {url} into {path}: {message}")]
    FetchFailed {
        url: String,
        path: PathBuf,
        message: String,
    },

    /// The build script could not be started at all.
    #[error("Could not launch build script '{script}' in {dir}: {message}")]
    BuildLaunchFailed {
        script: String,
        dir: PathBuf,
        message: String,
    },

    /// The build script ran but reported failure.
    #[error("Build script '{script}' in {dir} exited with code {code:?}")]
    BuildFailed {
        script: String,
        dir: PathBuf,
        code: Option<i32>,
    },

    /// A process could not be started or waited on.
    #[error("Failed to start {command}: {message}")]
    CommandLaunchFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for teardownm operations.
pub type Result<T> = std::result::Result<T, SetupError>;
