//! Process collaborator trait for out-of-process invocations.
//!
//! The forking executer hands a working directory, an ordered argument
//! vector and an environment to this seam and gets back the captured
//! output and exit status. Implementations can spawn a real Gradle
//! distribution or provide scripted behavior for testing.

use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Captured outcome of one spawned build process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code from the process (0 indicates success).
    pub exit_code: i32,

    /// Standard output from the process.
    pub stdout: String,

    /// Standard error output from the process.
    pub stderr: String,
}

impl ProcessOutput {
    /// Checks if the process succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns stdout and stderr as one captured console transcript.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        if self.stdout.is_empty() {
            return self.stderr.clone();
        }
        let mut combined = self.stdout.clone();
        if !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

/// Launches one build process and waits for completion.
///
/// A non-zero exit status is a normal [`ProcessOutput`], not an error;
/// errors mean the process could not be started at all.
pub trait ProcessRunner: Send + Sync {
    /// Runs the build tool with the compiled arguments.
    ///
    /// # Arguments
    ///
    /// * `working_directory` - Directory the process starts in.
    /// * `arguments` - Ordered argument vector for the build tool.
    /// * `environment` - Extra environment variables for the process.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::InvalidConfiguration` when the configured
    /// executable does not exist, or `HarnessError::LaunchFailed` when
    /// the process cannot be spawned.
    fn run(
        &self,
        working_directory: &Path,
        arguments: &[String],
        environment: &BTreeMap<String, String>,
    ) -> Result<ProcessOutput>;
}
