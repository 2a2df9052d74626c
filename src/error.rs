//! Error types for cmsprobe operations.
//!
//! This module defines [`ProbeError`], the error type used by everything
//! around the check engine (profile loading, snapshot loading, talking to
//! the live runtime), and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Check rules never produce a `ProbeError`; a bad or missing setting is
//!   classified into a [`Severity`](crate::check::Severity) instead
//! - Use `ProbeError` for failures that stop the tool from evaluating at all
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cmsprobe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Requirement profile not found at the given location.
    #[error("Profile not found: {path}")]
    ProfileNotFound { path: PathBuf },

    /// Failed to parse a requirement profile.
    #[error("Failed to parse profile at {path}: {message}")]
    ProfileParseError { path: PathBuf, message: String },

    /// The merged profile is structurally valid but semantically wrong.
    #[error("Invalid profile: {message}")]
    ProfileInvalid { message: String },

    /// Environment snapshot not found at the given location.
    #[error("Snapshot not found: {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Failed to parse an environment snapshot.
    #[error("Failed to parse snapshot at {path}: {message}")]
    SnapshotParseError { path: PathBuf, message: String },

    /// The PHP interpreter could not be located.
    #[error("PHP runtime not found: {binary}")]
    RuntimeNotFound { binary: String },

    /// The PHP interpreter ran but its report could not be collected.
    #[error("Failed to collect runtime configuration: {message}")]
    RuntimeCollectionFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cmsprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
