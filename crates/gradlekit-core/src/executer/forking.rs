//! Out-of-process executer spawning the build tool.

use crate::config::GradleInvocation;
use crate::error::Result;
use crate::executer::{
    ExecuterState, ExecutionFailure, ExecutionResult, GradleExecuter, InvocationOutcome,
    expect_failure, expect_success,
};
use crate::tools::fs_impl::StdFsAdapter;
use crate::tools::process::ProcessRunner;
use crate::tools::process_impl::GradleCommandRunner;
use gradlekit_diagnose::{BuildCause, parse_failure_output};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Executer realizing each invocation as a spawned build process.
///
/// On a non-zero exit the cause graph is recovered from the captured
/// console output; when the output carries no parsable failure section a
/// single-node cause with the exit status is synthesized, so a failure
/// always has a graph to classify.
///
/// # Examples
///
/// ```no_run
/// use gradlekit_core::{ForkingExecuter, GradleExecuter};
///
/// # fn main() -> gradlekit_core::Result<()> {
/// let mut executer = ForkingExecuter::new("/tmp/test-dir");
/// let result = executer.with_tasks(["help"]).run()?;
/// assert!(result.output.contains("BUILD SUCCESSFUL"));
/// # Ok(())
/// # }
/// ```
pub struct ForkingExecuter {
    state: ExecuterState,
    runner: Arc<dyn ProcessRunner>,
}

impl ForkingExecuter {
    /// Creates an executer spawning `gradle` from the `PATH`.
    pub fn new(test_directory: impl Into<PathBuf>) -> Self {
        Self::with_runner(test_directory, Arc::new(GradleCommandRunner::default()))
    }

    /// Creates an executer spawning builds through the given runner.
    ///
    /// # Arguments
    ///
    /// * `test_directory` - Directory bounding the invocations.
    /// * `runner` - Process collaborator launching the builds.
    pub fn with_runner(
        test_directory: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            state: ExecuterState::new(test_directory.into(), Arc::new(StdFsAdapter::new())),
            runner,
        }
    }

    fn invoke(
        runner: &dyn ProcessRunner,
        invocation: &GradleInvocation,
        arguments: Vec<String>,
    ) -> Result<InvocationOutcome> {
        let output = runner.run(
            &invocation.working_directory,
            &arguments,
            &invocation.environment,
        )?;
        let console_output = output.combined();

        if output.success() {
            return Ok(InvocationOutcome::Succeeded(ExecutionResult {
                output: console_output,
            }));
        }

        let root_cause = parse_failure_output(&console_output).unwrap_or_else(|| {
            BuildCause::new(format!(
                "Gradle invocation failed with exit code {}.",
                output.exit_code
            ))
        });
        Ok(InvocationOutcome::Failed(ExecutionFailure {
            output: console_output,
            root_cause,
        }))
    }
}

impl GradleExecuter for ForkingExecuter {
    fn test_directory(&self) -> &Path {
        self.state.test_directory()
    }

    fn invocation(&self) -> &GradleInvocation {
        self.state.invocation()
    }

    fn set_invocation(&mut self, invocation: GradleInvocation) {
        self.state.set_invocation(invocation);
    }

    fn before_execute(
        &mut self,
        hook: impl Fn(&mut GradleInvocation) -> Result<()> + Send + 'static,
    ) {
        self.state.push_before_hook(Box::new(hook));
    }

    fn after_execute(&mut self, hook: impl Fn(&GradleInvocation) -> Result<()> + Send + 'static) {
        self.state.push_after_hook(Box::new(hook));
    }

    fn run(&mut self) -> Result<ExecutionResult> {
        let runner = Arc::clone(&self.runner);
        let outcome = self
            .state
            .execute(|invocation, arguments| Self::invoke(runner.as_ref(), invocation, arguments))?;
        expect_success(outcome)
    }

    fn run_with_failure(&mut self) -> Result<ExecutionFailure> {
        let runner = Arc::clone(&self.runner);
        let outcome = self
            .state
            .execute(|invocation, arguments| Self::invoke(runner.as_ref(), invocation, arguments))?;
        expect_failure(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::process::ProcessOutput;
    use crate::tools::process_mock::MockProcessRunner;
    use tempfile::TempDir;

    #[test]
    fn test_failure_without_parsable_section_synthesizes_cause() {
        let temp_dir = TempDir::new().unwrap();
        let runner = MockProcessRunner::new();
        runner.enqueue_output(ProcessOutput {
            exit_code: 137,
            stdout: String::new(),
            stderr: "Killed".to_string(),
        });

        let mut executer = ForkingExecuter::with_runner(temp_dir.path(), Arc::new(runner));
        let failure = executer.run_with_failure().unwrap();

        assert_eq!(
            failure.root_cause.message,
            "Gradle invocation failed with exit code 137."
        );
    }

    #[test]
    fn test_failure_output_is_parsed_into_cause_graph() {
        let temp_dir = TempDir::new().unwrap();
        let runner = MockProcessRunner::new();
        runner.enqueue_output(ProcessOutput {
            exit_code: 1,
            stdout: String::new(),
            stderr: "\
* What went wrong:
Execution failed for task ':compileJava'.
> Could not find dev.gradleplugins:gradle-api:6.0.
"
            .to_string(),
        });

        let mut executer = ForkingExecuter::with_runner(temp_dir.path(), Arc::new(runner));
        let failure = executer.run_with_failure().unwrap();

        assert_eq!(
            failure.root_cause.cause.as_deref().unwrap().message,
            "Could not find dev.gradleplugins:gradle-api:6.0."
        );
    }
}
