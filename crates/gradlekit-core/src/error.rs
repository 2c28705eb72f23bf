//! Error types for harness operations.
//!
//! This module defines all error variants that can occur while driving a
//! Gradle build, from configuration misuse to post-run isolation checks.
//! All errors use `thiserror` for ergonomic error handling with context.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, launching or checking an invocation.
///
/// An *expected* build failure under `run_with_failure` is a normal
/// result and never surfaces here; these variants cover misuse, launch
/// problems, wrong outcomes and post-run assertions.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HarnessError {
    // Configuration and launch errors
    /// The harness was configured in a way the host context cannot honor,
    /// e.g. a Gradle executable that does not exist.
    #[error("invalid harness configuration: {0}")]
    InvalidConfiguration(String),

    /// The build process could not be started; no invocation took place.
    #[error("failed to launch the build process: {0}")]
    LaunchFailed(String),

    // Outcome errors
    /// `run` was called but the underlying build failed.
    #[error("build was expected to succeed but failed:\n{output}")]
    UnexpectedBuildFailure {
        /// Captured console output of the failed build.
        output: String,
    },

    /// `run_with_failure` was called but the underlying build succeeded.
    #[error("build was expected to fail but succeeded:\n{output}")]
    UnexpectedBuildSuccess {
        /// Captured console output of the successful build.
        output: String,
    },

    // Isolation errors
    /// The isolated Maven repository was written to during the build.
    #[error("isolated maven repository was polluted during the build: {0}")]
    RepositoryLeakage(PathBuf),

    // File system errors
    /// Path not found in the file system.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// Invalid path provided.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// Error reading file.
    #[error("file read error: {0}")]
    FileReadError(String),

    /// Error writing file.
    #[error("file write error: {0}")]
    FileWriteError(String),

    /// Permission denied for the specified operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    // IO and system errors
    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // Anyhow passthrough for rich context
    /// Generic error with context from anyhow, e.g. raised by a hook.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for harness operations.
///
/// All fallible harness operations return this type, using
/// [`HarnessError`] for error variants.
pub type Result<T> = std::result::Result<T, HarnessError>;
