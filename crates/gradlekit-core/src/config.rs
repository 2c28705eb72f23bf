//! Invocation configuration for the harness.
//!
//! This module defines [`GradleInvocation`], the immutable value object
//! describing one build invocation, and the console mode enum. Every
//! `with_*` mutator consumes the configuration and returns a logically new
//! one; no two configurations share mutable nested containers.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Console mode requested from Gradle via `--console`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// No color or rich output.
    Plain,

    /// Let Gradle pick based on how the process is attached.
    Auto,

    /// Color and rich output regardless of attachment.
    Rich,

    /// Rich output plus all log events on the console.
    Verbose,
}

impl fmt::Display for ConsoleOutput {
    /// Renders the mode name the way the `--console` argument expects it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            Self::Plain => "plain",
            Self::Auto => "auto",
            Self::Rich => "rich",
            Self::Verbose => "verbose",
        };
        write!(f, "{mode}")
    }
}

/// Immutable description of one Gradle invocation.
///
/// A fresh configuration targets the given working directory, shows stack
/// traces, and carries no tasks or extra arguments. The executer resets
/// its held configuration to this state after every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleInvocation {
    /// Directory the build runs in.
    pub working_directory: PathBuf,

    /// Value for the `-Duser.home` host-process property, if any.
    pub user_home_directory: Option<PathBuf>,

    /// Explicit settings file; set it to bypass settings-file resolution.
    pub settings_file: Option<PathBuf>,

    /// Explicit build script passed via `--build-file`.
    pub build_script: Option<PathBuf>,

    /// Explicit project directory passed via `--project-dir`.
    pub project_directory: Option<PathBuf>,

    /// Init scripts passed via `--init-script`, in declared order.
    pub init_scripts: Vec<PathBuf>,

    /// Console mode passed via `--console`, if any.
    pub console: Option<ConsoleOutput>,

    /// Whether `--stacktrace` is passed. Defaults to `true`.
    pub show_stacktrace: bool,

    /// Environment variables for the build process, keys unique.
    pub environment: BTreeMap<String, String>,

    /// Free arguments, in declared order.
    pub arguments: Vec<String>,

    /// Tasks to execute, in declared order; always the final section.
    pub tasks: Vec<String>,

    /// Whether the embedded runner should attach a debugger.
    pub debug: bool,

    /// Gradle version requested from the embedded runner, if any.
    pub gradle_version: Option<String>,
}

impl GradleInvocation {
    /// Creates a fresh configuration targeting the given directory.
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            user_home_directory: None,
            settings_file: None,
            build_script: None,
            project_directory: None,
            init_scripts: Vec::new(),
            console: None,
            show_stacktrace: true,
            environment: BTreeMap::new(),
            arguments: Vec::new(),
            tasks: Vec::new(),
            debug: false,
            gradle_version: None,
        }
    }

    /// Returns a configuration running in the given directory.
    pub fn with_working_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.working_directory = directory.into();
        self
    }

    /// Returns a configuration with the `-Duser.home` property set.
    pub fn with_user_home_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.user_home_directory = Some(directory.into());
        self
    }

    /// Returns a configuration that does not pass `--stacktrace`.
    pub fn with_stacktrace_disabled(mut self) -> Self {
        self.show_stacktrace = false;
        self
    }

    /// Returns a configuration using an explicit settings file.
    ///
    /// Setting this bypasses the settings-file resolver entirely: no
    /// directory walk and no fabrication happen at compile time.
    pub fn with_settings_file(mut self, settings_file: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(settings_file.into());
        self
    }

    /// Returns a configuration using an explicit build script.
    pub fn with_build_script(mut self, build_script: impl Into<PathBuf>) -> Self {
        self.build_script = Some(build_script.into());
        self
    }

    /// Returns a configuration using an explicit project directory.
    pub fn with_project_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.project_directory = Some(directory.into());
        self
    }

    /// Returns a configuration with one more init script appended.
    pub fn with_init_script(mut self, init_script: impl Into<PathBuf>) -> Self {
        self.init_scripts.push(init_script.into());
        self
    }

    /// Returns a configuration whose free arguments are replaced.
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Returns a configuration with one more free argument appended.
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Returns a configuration with the given tasks appended.
    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks.extend(tasks.into_iter().map(Into::into));
        self
    }

    /// Returns a configuration with the given environment merged in.
    ///
    /// Later entries win over earlier ones for the same key.
    pub fn with_environment_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment
            .extend(vars.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    /// Returns a configuration with the console mode set.
    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = Some(console);
        self
    }

    /// Returns a configuration asking the embedded runner for a debugger.
    pub fn with_debugger_attached(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Returns a configuration pinning the embedded runner's Gradle version.
    pub fn with_gradle_version(mut self, version: impl Into<String>) -> Self {
        self.gradle_version = Some(version.into());
        self
    }
}
