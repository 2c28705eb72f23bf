//! Integration tests for settings-file resolution against a real
//! file system.

use gradlekit_core::tools::fs_impl::StdFsAdapter;
use gradlekit_core::tools::process_mock::MockProcessRunner;
use gradlekit_core::{ForkingExecuter, GradleExecuter, resolve_settings_file};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_existing_settings_file_is_found() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("settings.gradle");
    fs::write(&settings, "rootProject.name = 'sample'").unwrap();

    let resolution =
        resolve_settings_file(temp_dir.path(), temp_dir.path(), &StdFsAdapter::new()).unwrap();

    assert!(resolution.found);
    assert_eq!(resolution.location, settings);
}

#[test]
fn test_kotlin_script_variant_is_found_at_ancestor() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("settings.gradle.kts");
    fs::write(&settings, "").unwrap();
    let nested = temp_dir.path().join("sub").join("project");
    fs::create_dir_all(&nested).unwrap();

    let resolution =
        resolve_settings_file(&nested, temp_dir.path(), &StdFsAdapter::new()).unwrap();

    assert!(resolution.found);
    assert_eq!(resolution.location, settings);
}

#[test]
fn test_missing_settings_file_is_fabricated_empty() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("proj");
    fs::create_dir(&nested).unwrap();

    let resolution =
        resolve_settings_file(&nested, temp_dir.path(), &StdFsAdapter::new()).unwrap();

    assert!(!resolution.found);
    let fabricated = nested.join("settings.gradle");
    assert_eq!(resolution.location, fabricated);
    assert_eq!(fs::read_to_string(&fabricated).unwrap(), "");
    // never fabricated at a visited ancestor
    assert!(!temp_dir.path().join("settings.gradle").exists());
}

#[test]
fn test_refabrication_does_not_happen_after_first_resolution() {
    let temp_dir = TempDir::new().unwrap();
    let adapter = StdFsAdapter::new();

    let first = resolve_settings_file(temp_dir.path(), temp_dir.path(), &adapter).unwrap();
    fs::write(&first.location, "rootProject.name = 'kept'").unwrap();
    let second = resolve_settings_file(temp_dir.path(), temp_dir.path(), &adapter).unwrap();

    assert!(second.found);
    // content written after fabrication survives re-resolution
    assert_eq!(
        fs::read_to_string(&second.location).unwrap(),
        "rootProject.name = 'kept'"
    );
}

#[test]
fn test_explicit_settings_file_bypasses_resolution() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();
    let elsewhere = temp_dir.path().join("elsewhere.gradle");

    let mut executer = ForkingExecuter::with_runner(temp_dir.path(), Arc::new(runner.clone()));
    executer.using_settings_file(&elsewhere).run().unwrap();

    let arguments = &runner.launches()[0].arguments;
    let settings = arguments.iter().position(|a| a == "--settings-file").unwrap();
    assert_eq!(arguments[settings + 1], elsewhere.display().to_string());
    // no walk, no fabrication
    assert!(!temp_dir.path().join("settings.gradle").exists());
}

#[test]
fn test_executer_fabricates_during_compilation() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockProcessRunner::succeeding();

    let mut executer = ForkingExecuter::with_runner(temp_dir.path(), Arc::new(runner));
    executer.run().unwrap();

    assert!(temp_dir.path().join("settings.gradle").is_file());
}
