//! Executers driving one build invocation at a time.
//!
//! An executer holds the per-invocation configuration by value, fires
//! registered before-hooks, compiles the argument vector, realizes the
//! invocation through its collaborator, fires after-hooks and resets the
//! configuration. Hook lists are instance-scoped and survive the reset;
//! the configuration is run-scoped and does not.
//!
//! Two executers ship: [`ForkingExecuter`] spawns the build tool as a
//! subprocess, [`EmbeddedExecuter`] drives an in-process runner.

pub mod embedded;
pub mod forking;

pub use embedded::EmbeddedExecuter;
pub use forking::ForkingExecuter;

use crate::arguments::compile_arguments;
use crate::config::{ConsoleOutput, GradleInvocation};
use crate::error::{HarnessError, Result};
use crate::tools::fs::FsAdapter;
use gradlekit_diagnose::BuildCause;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Captured outcome of an invocation that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured console output of the build.
    pub output: String,
}

/// Captured outcome of an invocation that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure {
    /// Captured console output of the build.
    pub output: String,

    /// Root of the failure's cause graph.
    pub root_cause: BuildCause,
}

/// Outcome of one invocation that actually ran, success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InvocationOutcome {
    Succeeded(ExecutionResult),
    Failed(ExecutionFailure),
}

/// Hook fired before every invocation; may rewrite the configuration.
pub type BeforeHook = Box<dyn Fn(&mut GradleInvocation) -> Result<()> + Send>;

/// Hook fired after every completed invocation, success or failure.
pub type AfterHook = Box<dyn Fn(&GradleInvocation) -> Result<()> + Send>;

/// Capability set of a build executer.
///
/// Configuration mutators replace the held [`GradleInvocation`] with a
/// new copy-on-write value and return `&mut Self` for chaining. The
/// configuration is run-scoped: every `run`/`run_with_failure` that got
/// as far as attempting the invocation resets it back to a fresh one
/// targeting the test directory. Hooks registered with
/// [`before_execute`](GradleExecuter::before_execute) and
/// [`after_execute`](GradleExecuter::after_execute) persist for the
/// executer's lifetime.
pub trait GradleExecuter {
    /// Directory bounding this executer's invocations.
    fn test_directory(&self) -> &Path;

    /// Current per-invocation configuration.
    fn invocation(&self) -> &GradleInvocation;

    /// Replaces the per-invocation configuration wholesale.
    fn set_invocation(&mut self, invocation: GradleInvocation);

    /// Registers a hook fired before every invocation, in registration
    /// order. Before-hooks may rewrite the invocation; a hook error
    /// aborts the run before anything is launched.
    fn before_execute(
        &mut self,
        hook: impl Fn(&mut GradleInvocation) -> Result<()> + Send + 'static,
    );

    /// Registers a hook fired after every invocation that actually
    /// happened, success or failure alike, in registration order. An
    /// after-hook error overrides an otherwise-successful outcome.
    fn after_execute(&mut self, hook: impl Fn(&GradleInvocation) -> Result<()> + Send + 'static);

    /// Runs the build, expecting success.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::UnexpectedBuildFailure` when the build
    /// fails, or whatever a hook or the collaborator raised.
    fn run(&mut self) -> Result<ExecutionResult>;

    /// Runs the build, expecting failure.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::UnexpectedBuildSuccess` when the build
    /// unexpectedly passes, or whatever a hook or the collaborator
    /// raised.
    fn run_with_failure(&mut self) -> Result<ExecutionFailure>;

    /// Runs the next invocation in the given directory.
    fn in_directory(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        let next = self.invocation().clone().with_working_directory(directory);
        self.set_invocation(next);
        self
    }

    /// Sets the `-Duser.home` property for the next invocation.
    fn with_user_home_directory(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        let next = self.invocation().clone().with_user_home_directory(directory);
        self.set_invocation(next);
        self
    }

    /// Drops `--stacktrace` from the next invocation.
    fn with_stacktrace_disabled(&mut self) -> &mut Self {
        let next = self.invocation().clone().with_stacktrace_disabled();
        self.set_invocation(next);
        self
    }

    /// Uses an explicit settings file, bypassing resolution entirely.
    fn using_settings_file(&mut self, settings_file: impl Into<PathBuf>) -> &mut Self {
        let next = self.invocation().clone().with_settings_file(settings_file);
        self.set_invocation(next);
        self
    }

    /// Uses an explicit build script via `--build-file`.
    fn using_build_script(&mut self, build_script: impl Into<PathBuf>) -> &mut Self {
        let next = self.invocation().clone().with_build_script(build_script);
        self.set_invocation(next);
        self
    }

    /// Appends an init script passed via `--init-script`.
    fn using_init_script(&mut self, init_script: impl Into<PathBuf>) -> &mut Self {
        let next = self.invocation().clone().with_init_script(init_script);
        self.set_invocation(next);
        self
    }

    /// Uses an explicit project directory via `--project-dir`.
    fn using_project_directory(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        let next = self.invocation().clone().with_project_directory(directory);
        self.set_invocation(next);
        self
    }

    /// Enables the build cache; sugar for the `--build-cache` argument.
    fn with_build_cache_enabled(&mut self) -> &mut Self {
        self.with_argument("--build-cache")
    }

    /// Replaces the free arguments of the next invocation.
    fn with_arguments<I, S>(&mut self, arguments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self.invocation().clone().with_arguments(arguments);
        self.set_invocation(next);
        self
    }

    /// Appends one free argument to the next invocation.
    fn with_argument(&mut self, argument: impl Into<String>) -> &mut Self {
        let next = self.invocation().clone().with_argument(argument);
        self.set_invocation(next);
        self
    }

    /// Appends tasks to the next invocation.
    fn with_tasks<I, S>(&mut self, tasks: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self.invocation().clone().with_tasks(tasks);
        self.set_invocation(next);
        self
    }

    /// Merges environment variables into the next invocation.
    fn with_environment_vars<I, K, V>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let next = self.invocation().clone().with_environment_vars(vars);
        self.set_invocation(next);
        self
    }

    /// Sets the console mode of the next invocation.
    fn with_console(&mut self, console: ConsoleOutput) -> &mut Self {
        let next = self.invocation().clone().with_console(console);
        self.set_invocation(next);
        self
    }

    /// Asks the embedded runner to attach a debugger for the next
    /// invocation. The forking executer ignores the flag.
    fn with_debugger_attached(&mut self) -> &mut Self {
        let next = self.invocation().clone().with_debugger_attached();
        self.set_invocation(next);
        self
    }
}

/// Shared executer state: configuration by value plus the hook lists.
pub(crate) struct ExecuterState {
    test_directory: PathBuf,
    invocation: GradleInvocation,
    fs: Arc<dyn FsAdapter>,
    before_execute: Vec<BeforeHook>,
    after_execute: Vec<AfterHook>,
}

impl ExecuterState {
    pub(crate) fn new(test_directory: PathBuf, fs: Arc<dyn FsAdapter>) -> Self {
        let invocation = GradleInvocation::new(test_directory.clone());
        Self {
            test_directory,
            invocation,
            fs,
            before_execute: Vec::new(),
            after_execute: Vec::new(),
        }
    }

    pub(crate) fn test_directory(&self) -> &Path {
        &self.test_directory
    }

    pub(crate) fn invocation(&self) -> &GradleInvocation {
        &self.invocation
    }

    pub(crate) fn set_invocation(&mut self, invocation: GradleInvocation) {
        self.invocation = invocation;
    }

    pub(crate) fn push_before_hook(&mut self, hook: BeforeHook) {
        self.before_execute.push(hook);
    }

    pub(crate) fn push_after_hook(&mut self, hook: AfterHook) {
        self.after_execute.push(hook);
    }

    /// Drives one invocation through its full lifecycle.
    ///
    /// Fires before-hooks, compiles the arguments (settings-file
    /// resolution included), realizes the invocation through `invoke`,
    /// fires after-hooks whenever the invocation produced an outcome,
    /// and resets the run-scoped configuration on every path that
    /// attempted the invocation.
    pub(crate) fn execute<F>(&mut self, invoke: F) -> Result<InvocationOutcome>
    where
        F: FnOnce(&GradleInvocation, Vec<String>) -> Result<InvocationOutcome>,
    {
        self.fire_before_execute()?;

        let invocation = self.invocation.clone();
        let outcome =
            match compile_arguments(&invocation, &self.test_directory, self.fs.as_ref()) {
                Ok(arguments) => invoke(&invocation, arguments),
                Err(error) => Err(error),
            };

        // After-hooks only fire when the invocation actually happened;
        // the reset runs regardless, and a hook error wins over the
        // build outcome.
        let hooks = match &outcome {
            Ok(_) => self.fire_after_execute(&invocation),
            Err(_) => Ok(()),
        };
        self.reset();

        let outcome = outcome?;
        hooks?;
        Ok(outcome)
    }

    fn fire_before_execute(&mut self) -> Result<()> {
        tracing::debug!(hooks = self.before_execute.len(), "firing before-execute hooks");
        for hook in &self.before_execute {
            hook(&mut self.invocation)?;
        }
        Ok(())
    }

    fn fire_after_execute(&self, invocation: &GradleInvocation) -> Result<()> {
        tracing::debug!(hooks = self.after_execute.len(), "firing after-execute hooks");
        for hook in &self.after_execute {
            hook(invocation)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.invocation = GradleInvocation::new(self.test_directory.clone());
    }
}

pub(crate) fn expect_success(outcome: InvocationOutcome) -> Result<ExecutionResult> {
    match outcome {
        InvocationOutcome::Succeeded(result) => Ok(result),
        InvocationOutcome::Failed(failure) => Err(HarnessError::UnexpectedBuildFailure {
            output: failure.output,
        }),
    }
}

pub(crate) fn expect_failure(outcome: InvocationOutcome) -> Result<ExecutionFailure> {
    match outcome {
        InvocationOutcome::Failed(failure) => Ok(failure),
        InvocationOutcome::Succeeded(result) => Err(HarnessError::UnexpectedBuildSuccess {
            output: result.output,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_success_converts_failure() {
        let outcome = InvocationOutcome::Failed(ExecutionFailure {
            output: "boom".to_string(),
            root_cause: BuildCause::new("boom"),
        });

        let error = expect_success(outcome).unwrap_err();

        assert!(matches!(
            error,
            HarnessError::UnexpectedBuildFailure { output } if output == "boom"
        ));
    }

    #[test]
    fn test_expect_failure_converts_success() {
        let outcome = InvocationOutcome::Succeeded(ExecutionResult {
            output: "BUILD SUCCESSFUL".to_string(),
        });

        let error = expect_failure(outcome).unwrap_err();

        assert!(matches!(error, HarnessError::UnexpectedBuildSuccess { .. }));
    }
}
