//! Embedded runner collaborator trait for in-process invocations.
//!
//! The embedded executer drives a runner living in the same process
//! instead of spawning a distribution. Embedding Gradle is the
//! integrator's concern; this module only defines the contract the
//! executer compiles its invocation into.

use crate::error::Result;
use gradlekit_diagnose::BuildCause;
use std::path::PathBuf;

/// One compiled request handed to an embedded runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerRequest {
    /// Project directory the build runs against.
    pub project_directory: PathBuf,

    /// Ordered argument vector for the build.
    pub arguments: Vec<String>,

    /// Whether the runner should attach a debugger.
    pub debug: bool,

    /// Gradle version to run with, if pinned.
    pub gradle_version: Option<String>,
}

/// Outcome reported by an embedded runner.
///
/// The runner observed the build in-process, so on failure it hands back
/// the cause graph directly instead of console text to re-parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOutcome {
    /// Captured build output.
    pub output: String,

    /// Root of the failure's cause graph; `None` means the build passed.
    pub failure: Option<BuildCause>,
}

/// Executes one build inside the current process.
pub trait EmbeddedRunner: Send + Sync {
    /// Runs the build described by the request and waits for completion.
    ///
    /// A failed build is a normal [`RunnerOutcome`] carrying its cause
    /// graph; errors mean the runner could not start the build at all.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::InvalidConfiguration` when the runner
    /// cannot honor the request, e.g. an unknown pinned Gradle version.
    fn execute(&self, request: &RunnerRequest) -> Result<RunnerOutcome>;
}
