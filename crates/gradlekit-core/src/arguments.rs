//! Compiles an invocation configuration into an argument vector.
//!
//! The sections have a fixed order that never changes with the order the
//! configuration was built in: user-home property, build file, project
//! directory, init scripts, settings file, stacktrace, console mode, free
//! arguments, tasks.

use crate::config::GradleInvocation;
use crate::error::Result;
use crate::settings::resolve_settings_file;
use crate::tools::fs::FsAdapter;
use std::path::Path;

/// Compiles the ordered argument vector for one invocation.
///
/// Deterministic given the configuration and the file system state at
/// compile time. When no explicit settings file is configured, the
/// settings-file resolver runs as a side effect (possibly fabricating a
/// file, see [`resolve_settings_file`]) and no argument is emitted for
/// it.
///
/// # Arguments
///
/// * `invocation` - Configuration to compile.
/// * `root` - Bounding directory for settings-file resolution.
/// * `fs` - File system adapter handed to the resolver.
///
/// # Errors
///
/// Returns a file system error when settings-file fabrication fails.
pub fn compile_arguments(
    invocation: &GradleInvocation,
    root: &Path,
    fs: &dyn FsAdapter,
) -> Result<Vec<String>> {
    let mut arguments = Vec::new();

    // Host-process properties
    if let Some(user_home) = &invocation.user_home_directory {
        arguments.push(format!("-Duser.home={}", user_home.display()));
    }

    // Gradle arguments
    if let Some(build_script) = &invocation.build_script {
        arguments.push("--build-file".to_string());
        arguments.push(build_script.display().to_string());
    }
    if let Some(project_directory) = &invocation.project_directory {
        arguments.push("--project-dir".to_string());
        arguments.push(project_directory.display().to_string());
    }
    for init_script in &invocation.init_scripts {
        arguments.push("--init-script".to_string());
        arguments.push(init_script.display().to_string());
    }
    match &invocation.settings_file {
        Some(settings_file) => {
            arguments.push("--settings-file".to_string());
            arguments.push(settings_file.display().to_string());
        }
        None => {
            // Deal with a missing settings.gradle[.kts] file
            resolve_settings_file(&invocation.working_directory, root, fs)?;
        }
    }
    if invocation.show_stacktrace {
        arguments.push("--stacktrace".to_string());
    }
    if let Some(console) = invocation.console {
        arguments.push("--console".to_string());
        arguments.push(console.to_string());
    }

    arguments.extend(invocation.arguments.iter().cloned());
    arguments.extend(invocation.tasks.iter().cloned());

    Ok(arguments)
}
