//! Integration tests for Maven-local isolation.

use gradlekit_core::isolation::ISOLATED_REPOSITORY_DIR_NAME;
use gradlekit_core::tools::fs_impl::StdFsAdapter;
use gradlekit_core::tools::process_mock::MockProcessRunner;
use gradlekit_core::{ForkingExecuter, GradleExecuter, HarnessError, MavenLocalGuard};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn guarded_executer(temp_dir: &TempDir) -> (ForkingExecuter, MavenLocalGuard, MockProcessRunner) {
    let runner = MockProcessRunner::succeeding();
    let executer = ForkingExecuter::with_runner(temp_dir.path(), Arc::new(runner.clone()));
    let guard = MavenLocalGuard::new(temp_dir.path(), Arc::new(StdFsAdapter::new()));
    (executer, guard, runner)
}

#[test]
fn test_isolation_repoints_maven_local() {
    let temp_dir = TempDir::new().unwrap();
    let (mut executer, guard, runner) = guarded_executer(&temp_dir);
    guard.isolate(&mut executer);

    executer.with_tasks(["publishToMavenLocal"]).run().unwrap();

    let isolated = temp_dir.path().join(ISOLATED_REPOSITORY_DIR_NAME);
    assert!(isolated.is_dir());
    let expected = format!("-Dmaven.repo.local={}", isolated.display());
    assert!(runner.launches()[0].arguments.contains(&expected));
}

#[test]
fn test_leakage_fails_a_successful_build() {
    let temp_dir = TempDir::new().unwrap();
    let (mut executer, guard, runner) = guarded_executer(&temp_dir);
    guard.isolate(&mut executer);

    // simulate a build publishing into the isolated repository
    let leaked = temp_dir
        .path()
        .join(ISOLATED_REPOSITORY_DIR_NAME)
        .join("sample-artifact.jar");
    executer.before_execute(move |_invocation| {
        fs::write(&leaked, "bytes").unwrap();
        Ok(())
    });

    let error = executer.run().unwrap_err();

    assert_eq!(runner.launch_count(), 1);
    assert!(matches!(error, HarnessError::RepositoryLeakage(_)));
}

#[test]
fn test_clean_run_passes_the_leak_check() {
    let temp_dir = TempDir::new().unwrap();
    let (mut executer, guard, _runner) = guarded_executer(&temp_dir);
    guard.isolate(&mut executer);

    executer.run().unwrap();
    executer.run().unwrap();
}

#[test]
fn test_apply_switches_to_real_maven_home() {
    let temp_dir = TempDir::new().unwrap();
    let (mut executer, guard, runner) = guarded_executer(&temp_dir);
    guard.isolate(&mut executer);

    guard.apply(&mut executer).unwrap();
    executer.run().unwrap();

    let launch = &runner.launches()[0];
    let user_home = format!("-Duser.home={}", guard.user_home_directory().display());
    assert_eq!(launch.arguments[0], user_home);
    assert_eq!(
        launch.environment.get("M2_HOME"),
        Some(&guard.global_maven_directory().display().to_string())
    );
}

#[test]
fn test_apply_disables_isolation_permanently() {
    let temp_dir = TempDir::new().unwrap();
    let (mut executer, guard, runner) = guarded_executer(&temp_dir);
    guard.isolate(&mut executer);

    guard.apply(&mut executer).unwrap();
    executer.run().unwrap();
    executer.run().unwrap();

    assert!(!guard.isolation_enabled());
    for launch in runner.launches() {
        assert!(
            !launch
                .arguments
                .iter()
                .any(|argument| argument.starts_with("-Dmaven.repo.local="))
        );
    }
}

#[test]
fn test_disabled_isolation_tolerates_a_polluted_directory() {
    let temp_dir = TempDir::new().unwrap();
    let (mut executer, guard, _runner) = guarded_executer(&temp_dir);
    guard.isolate(&mut executer);
    guard.apply(&mut executer).unwrap();

    let polluted = temp_dir.path().join(ISOLATED_REPOSITORY_DIR_NAME);
    fs::create_dir_all(&polluted).unwrap();
    fs::write(polluted.join("leftover.jar"), "bytes").unwrap();

    // the after-hook is inert once isolation is disabled
    executer.run().unwrap();
}
