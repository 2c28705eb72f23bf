//! Integration tests for the executer lifecycle.
//!
//! Covers expected/unexpected outcomes, hook firing order, hook
//! persistence across invocations and the per-invocation reset.

use gradlekit_core::tools::process::ProcessOutput;
use gradlekit_core::tools::process_mock::MockProcessRunner;
use gradlekit_core::{ForkingExecuter, GradleExecuter, HarnessError};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn failing_output() -> ProcessOutput {
    ProcessOutput {
        exit_code: 1,
        stdout: String::new(),
        stderr: "\
FAILURE: Build failed with an exception.

* What went wrong:
Execution failed for task ':compileJava'.
> Could not find dev.gradleplugins:gradle-api:6.0.

* Try:
Run with --info or --debug option to get more log output.
"
        .to_string(),
    }
}

fn executer_with(runner: &MockProcessRunner, test_directory: &TempDir) -> ForkingExecuter {
    ForkingExecuter::with_runner(test_directory.path(), Arc::new(runner.clone()))
}

#[test]
fn test_run_returns_captured_output() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::new();
    runner.enqueue_output(ProcessOutput {
        exit_code: 0,
        stdout: "BUILD SUCCESSFUL in 1s".to_string(),
        stderr: String::new(),
    });

    let mut executer = executer_with(&runner, &temp_dir);
    let result = executer.with_tasks(["build"]).run().unwrap();

    assert_eq!(result.output, "BUILD SUCCESSFUL in 1s");
}

#[test]
fn test_run_on_failed_build_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::new();
    runner.enqueue_output(failing_output());

    let mut executer = executer_with(&runner, &temp_dir);
    let error = executer.with_tasks(["build"]).run().unwrap_err();

    assert!(matches!(
        error,
        HarnessError::UnexpectedBuildFailure { .. }
    ));
}

#[test]
fn test_run_with_failure_returns_cause_graph() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::new();
    runner.enqueue_output(failing_output());

    let mut executer = executer_with(&runner, &temp_dir);
    let failure = executer.with_tasks(["build"]).run_with_failure().unwrap();

    assert!(failure.output.contains("FAILURE"));
    assert_eq!(
        failure.root_cause.message,
        "Execution failed for task ':compileJava'."
    );
}

#[test]
fn test_run_with_failure_on_passing_build_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    let error = executer.with_tasks(["build"]).run_with_failure().unwrap_err();

    assert!(matches!(
        error,
        HarnessError::UnexpectedBuildSuccess { .. }
    ));
}

#[test]
fn test_before_hooks_fire_in_registration_order() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();
    let mut executer = executer_with(&runner, &temp_dir);

    executer.before_execute(|invocation| {
        *invocation = invocation.clone().with_argument("--first");
        Ok(())
    });
    executer.before_execute(|invocation| {
        *invocation = invocation.clone().with_argument("--second");
        Ok(())
    });

    executer.run().unwrap();

    let arguments = &runner.launches()[0].arguments;
    let first = arguments.iter().position(|a| a == "--first").unwrap();
    let second = arguments.iter().position(|a| a == "--second").unwrap();
    assert!(first < second);
}

#[test]
fn test_after_hooks_fire_on_success_and_failure() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();
    runner.enqueue_output(failing_output());

    let mut executer = executer_with(&runner, &temp_dir);
    let fired = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&fired);
    executer.after_execute(move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    executer.run_with_failure().unwrap();
    executer.run().unwrap();

    assert_eq!(*fired.lock().unwrap(), 2);
}

#[test]
fn test_after_hooks_skipped_when_invocation_never_happened() {
    let temp_dir = TempDir::new().unwrap();
    // no scripted output and no default: the launch itself fails
    let runner = MockProcessRunner::new();

    let mut executer = executer_with(&runner, &temp_dir);
    let fired = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&fired);
    executer.after_execute(move |_| {
        *flag.lock().unwrap() = true;
        Ok(())
    });

    let error = executer.run().unwrap_err();

    assert!(matches!(error, HarnessError::LaunchFailed(_)));
    assert!(!*fired.lock().unwrap());
}

#[test]
fn test_before_hook_error_aborts_without_launching() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    executer.before_execute(|_| {
        Err(HarnessError::InvalidConfiguration(
            "unsupported host".to_string(),
        ))
    });

    let error = executer.run().unwrap_err();

    assert!(matches!(error, HarnessError::InvalidConfiguration(_)));
    assert_eq!(runner.launch_count(), 0);
}

#[test]
fn test_after_hook_error_overrides_successful_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    executer.after_execute(|_| Err(HarnessError::InvalidConfiguration("leak".to_string())));

    let error = executer.run().unwrap_err();

    assert_eq!(runner.launch_count(), 1);
    assert!(matches!(error, HarnessError::InvalidConfiguration(_)));
}

#[test]
fn test_configuration_resets_between_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    executer
        .with_tasks(["assemble"])
        .with_argument("--build-cache")
        .run()
        .unwrap();
    executer.run().unwrap();

    let launches = runner.launches();
    assert!(launches[0].arguments.contains(&"assemble".to_string()));
    assert!(!launches[1].arguments.contains(&"assemble".to_string()));
    assert!(!launches[1].arguments.contains(&"--build-cache".to_string()));
}

#[test]
fn test_configuration_resets_even_after_unexpected_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();
    runner.enqueue_output(failing_output());

    let mut executer = executer_with(&runner, &temp_dir);
    executer.with_tasks(["assemble"]).run().unwrap_err();
    executer.run().unwrap();

    assert!(!runner.launches()[1].arguments.contains(&"assemble".to_string()));
}

#[test]
fn test_hooks_persist_across_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    executer.before_execute(|invocation| {
        *invocation = invocation.clone().with_argument("--offline");
        Ok(())
    });

    executer.run().unwrap();
    executer.run().unwrap();

    let launches = runner.launches();
    assert!(launches[0].arguments.contains(&"--offline".to_string()));
    assert!(launches[1].arguments.contains(&"--offline".to_string()));
}

#[test]
fn test_working_directory_override_is_run_scoped() {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path().join("proj");
    std::fs::create_dir(&project_dir).unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    executer.in_directory(&project_dir).run().unwrap();
    executer.run().unwrap();

    let launches = runner.launches();
    assert_eq!(launches[0].working_directory, project_dir);
    assert_eq!(launches[1].working_directory, temp_dir.path());
}

#[test]
fn test_environment_vars_reach_the_process() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = executer_with(&runner, &temp_dir);
    executer
        .with_environment_vars([("GRADLE_OPTS", "-Xmx512m")])
        .run()
        .unwrap();

    assert_eq!(
        runner.launches()[0].environment.get("GRADLE_OPTS"),
        Some(&"-Xmx512m".to_string())
    );
}
