//! In-process executer driving an embedded runner.

use crate::config::GradleInvocation;
use crate::error::Result;
use crate::executer::{
    ExecuterState, ExecutionFailure, ExecutionResult, GradleExecuter, InvocationOutcome,
    expect_failure, expect_success,
};
use crate::tools::fs_impl::StdFsAdapter;
use crate::tools::runner::{EmbeddedRunner, RunnerRequest};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Executer realizing each invocation through an [`EmbeddedRunner`].
///
/// Differs from the forking executer only in how the invocation is
/// realized: the compiled arguments, the debug flag and any pinned
/// Gradle version are handed to a runner living in this process, and the
/// runner reports the cause graph directly on failure.
pub struct EmbeddedExecuter {
    state: ExecuterState,
    runner: Arc<dyn EmbeddedRunner>,
}

impl EmbeddedExecuter {
    /// Creates an executer driving the given embedded runner.
    ///
    /// # Arguments
    ///
    /// * `test_directory` - Directory bounding the invocations.
    /// * `runner` - Embedded collaborator executing the builds.
    pub fn new(test_directory: impl Into<PathBuf>, runner: Arc<dyn EmbeddedRunner>) -> Self {
        Self {
            state: ExecuterState::new(test_directory.into(), Arc::new(StdFsAdapter::new())),
            runner,
        }
    }

    /// Pins the Gradle version the runner executes the next invocation
    /// with. Run-scoped like the rest of the configuration.
    pub fn using_gradle_version(&mut self, version: impl Into<String>) -> &mut Self {
        let next = self.invocation().clone().with_gradle_version(version);
        self.set_invocation(next);
        self
    }

    fn invoke(
        runner: &dyn EmbeddedRunner,
        invocation: &GradleInvocation,
        arguments: Vec<String>,
    ) -> Result<InvocationOutcome> {
        if invocation.debug {
            // Class loader issues in embedded runners can surface as
            // NoClassDefFoundError in the build under test.
            tracing::warn!("running with an attached debugger may break build class loading");
        }

        let request = RunnerRequest {
            project_directory: invocation.working_directory.clone(),
            arguments,
            debug: invocation.debug,
            gradle_version: invocation.gradle_version.clone(),
        };
        let outcome = runner.execute(&request)?;

        Ok(match outcome.failure {
            None => InvocationOutcome::Succeeded(ExecutionResult {
                output: outcome.output,
            }),
            Some(root_cause) => InvocationOutcome::Failed(ExecutionFailure {
                output: outcome.output,
                root_cause,
            }),
        })
    }
}

impl GradleExecuter for EmbeddedExecuter {
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
    use crate::tools::runner_mock::MockEmbeddedRunner;
    use tempfile::TempDir;

    #[test]
    fn test_request_carries_compiled_invocation() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(MockEmbeddedRunner::succeeding());
        let runner_dyn: Arc<dyn EmbeddedRunner> = runner.clone();
        let mut executer = EmbeddedExecuter::new(temp_dir.path(), runner_dyn);

        executer
            .using_gradle_version("6.0")
            .with_debugger_attached()
            .with_tasks(["build"])
            .run()
            .unwrap();

        let requests = runner.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].project_directory, temp_dir.path());
        assert!(requests[0].debug);
        assert_eq!(requests[0].gradle_version.as_deref(), Some("6.0"));
        assert_eq!(requests[0].arguments.last().unwrap(), "build");
    }

    #[test]
    fn test_gradle_version_is_run_scoped() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(MockEmbeddedRunner::succeeding());
        let runner_dyn: Arc<dyn EmbeddedRunner> = runner.clone();
        let mut executer = EmbeddedExecuter::new(temp_dir.path(), runner_dyn);

        executer.using_gradle_version("6.0").run().unwrap();
        executer.run().unwrap();

        let requests = runner.requests();
        assert_eq!(requests[0].gradle_version.as_deref(), Some("6.0"));
        assert_eq!(requests[1].gradle_version, None);
    }
}
