//! Mock process runner for testing.
//!
//! Allows scripting process outputs per invocation and records every
//! launch, so executer tests can assert on the compiled argument vector
//! without spawning a real Gradle distribution.

use crate::error::{HarnessError, Result};
use crate::tools::process::{ProcessOutput, ProcessRunner};
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded launch: working directory, arguments and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLaunch {
    /// Directory the process was asked to start in.
    pub working_directory: PathBuf,

    /// Argument vector handed to the process.
    pub arguments: Vec<String>,

    /// Environment variables handed to the process.
    pub environment: BTreeMap<String, String>,
}

/// Mock process runner for testing.
///
/// Scripted outputs are consumed in FIFO order; when the queue is empty
/// the default output is returned, and with no default configured the
/// launch fails.
///
/// # Examples
///
/// ```
/// use gradlekit_core::tools::process_mock::MockProcessRunner;
/// use gradlekit_core::tools::process::{ProcessOutput, ProcessRunner};
/// use std::collections::BTreeMap;
/// use std::path::Path;
///
/// let runner = MockProcessRunner::succeeding();
/// let output = runner
///     .run(Path::new("/proj"), &["--stacktrace".to_string()], &BTreeMap::new())
///     .unwrap();
/// assert!(output.success());
/// assert_eq!(runner.launches().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockProcessRunner {
    /// Scripted outputs, consumed front to back
    outputs: Arc<Mutex<VecDeque<ProcessOutput>>>,
    /// Default output for launches beyond the script
    default_output: Arc<Mutex<Option<ProcessOutput>>>,
    /// Every launch, in order
    launches: Arc<Mutex<Vec<RecordedLaunch>>>,
}

impl MockProcessRunner {
    /// Creates a mock with no scripted outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose every launch succeeds with empty output.
    pub fn succeeding() -> Self {
        let runner = Self::new();
        runner.set_default_output(ProcessOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        });
        runner
    }

    /// Queues one scripted output.
    pub fn enqueue_output(&self, output: ProcessOutput) {
        self.outputs.lock().unwrap().push_back(output);
    }

    /// Sets the output used once the script is exhausted.
    pub fn set_default_output(&self, output: ProcessOutput) {
        *self.default_output.lock().unwrap() = Some(output);
    }

    /// Returns every recorded launch, in order.
    pub fn launches(&self) -> Vec<RecordedLaunch> {
        self.launches.lock().unwrap().clone()
    }

    /// Returns the number of launches so far.
    pub fn launch_count(&self) -> usize {
        self.launches.lock().unwrap().len()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(
        &self,
        working_directory: &Path,
        arguments: &[String],
        environment: &BTreeMap<String, String>,
    ) -> Result<ProcessOutput> {
        self.launches.lock().unwrap().push(RecordedLaunch {
            working_directory: working_directory.to_path_buf(),
            arguments: arguments.to_vec(),
            environment: environment.clone(),
        });

        if let Some(output) = self.outputs.lock().unwrap().pop_front() {
            return Ok(output);
        }
        if let Some(default) = self.default_output.lock().unwrap().clone() {
            return Ok(default);
        }
        Err(HarnessError::LaunchFailed(
            "no output scripted for launch".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_output() -> ProcessOutput {
        ProcessOutput {
            exit_code: 1,
            stdout: String::new(),
            stderr: "* What went wrong:\nboom\n".to_string(),
        }
    }

    #[test]
    fn test_scripted_outputs_consume_in_order() {
        let runner = MockProcessRunner::succeeding();
        runner.enqueue_output(failing_output());

        let first = runner
            .run(Path::new("/proj"), &[], &BTreeMap::new())
            .unwrap();
        let second = runner
            .run(Path::new("/proj"), &[], &BTreeMap::new())
            .unwrap();

        assert!(!first.success());
        assert!(second.success());
    }

    #[test]
    fn test_unscripted_launch_fails_without_default() {
        let runner = MockProcessRunner::new();

        let result = runner.run(Path::new("/proj"), &[], &BTreeMap::new());

        assert!(matches!(result.unwrap_err(), HarnessError::LaunchFailed(_)));
    }

    #[test]
    fn test_launches_are_recorded() {
        let runner = MockProcessRunner::succeeding();
        let arguments = vec!["--stacktrace".to_string(), "build".to_string()];

        runner
            .run(Path::new("/proj"), &arguments, &BTreeMap::new())
            .unwrap();

        let launches = runner.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].working_directory, Path::new("/proj"));
        assert_eq!(launches[0].arguments, arguments);
    }
}
