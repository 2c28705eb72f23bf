//! Standard process runner spawning a Gradle distribution.

use crate::error::{HarnessError, Result};
use crate::tools::process::{ProcessOutput, ProcessRunner};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Process runner spawning the `gradle` command line.
///
/// The executable defaults to `gradle` on the `PATH`; point it at a
/// specific distribution with [`GradleCommandRunner::new`].
#[derive(Debug, Clone)]
pub struct GradleCommandRunner {
    executable: PathBuf,
}

impl GradleCommandRunner {
    /// Creates a runner spawning the given Gradle executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Returns the executable this runner spawns.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Default for GradleCommandRunner {
    fn default() -> Self {
        Self::new("gradle")
    }
}

impl ProcessRunner for GradleCommandRunner {
    fn run(
        &self,
        working_directory: &Path,
        arguments: &[String],
        environment: &BTreeMap<String, String>,
    ) -> Result<ProcessOutput> {
        let mut command = Command::new(&self.executable);
        command.args(arguments).current_dir(working_directory);
        for (key, value) in environment {
            command.env(key, value);
        }

        tracing::debug!(
            executable = %self.executable.display(),
            working_directory = %working_directory.display(),
            ?arguments,
            "launching build process"
        );

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HarnessError::InvalidConfiguration(format!(
                    "gradle executable not found: {}",
                    self.executable.display()
                ))
            } else {
                HarnessError::LaunchFailed(format!("{}: {}", self.executable.display(), e))
            }
        })?;

        Ok(ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
