//! Gradlekit CLI - drive Gradle builds and diagnose failures.
//!
//! Command-line interface over the gradlekit harness: run a build in the
//! nearest Gradle project, or run one expecting failure and classify the
//! failure into actionable diagnostics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gradlekit_core::settings::{SETTINGS_FILE_NAME, SETTINGS_SCRIPT_FILE_NAME};
use gradlekit_core::tools::process_impl::GradleCommandRunner;
use gradlekit_core::{ForkingExecuter, GradleExecuter};
use gradlekit_diagnose::diagnose;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Gradlekit - Gradle build harness
///
/// Drives Gradle builds programmatically and classifies build failures.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available gradlekit commands
#[derive(Subcommand)]
enum Commands {
    /// Run a build expecting success
    ///
    /// Compiles the invocation, spawns the configured Gradle executable
    /// and prints the captured output.
    Run {
        /// Tasks to execute (e.g. "assemble check")
        tasks: Vec<String>,

        /// Project directory; defaults to the nearest directory holding
        /// a settings file
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Gradle executable overriding the configured one
        #[arg(long)]
        gradle: Option<PathBuf>,

        /// Do not pass --stacktrace
        #[arg(long)]
        no_stacktrace: bool,

        /// Extra free argument, repeatable
        #[arg(long = "arg")]
        arguments: Vec<String>,
    },

    /// Run a build expecting failure and classify it
    ///
    /// Spawns the build, walks the failure's cause graph through the
    /// known-pattern classifiers and prints the diagnostic report.
    Diagnose {
        /// Tasks to execute
        tasks: Vec<String>,

        /// Project directory; defaults to the nearest directory holding
        /// a settings file
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Gradle executable overriding the configured one
        #[arg(long)]
        gradle: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI configuration loaded from `gradlekit.toml` at the project root.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CliConfig {
    /// Gradle invocation settings.
    gradle: GradleSection,
}

/// `[gradle]` section of `gradlekit.toml`.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct GradleSection {
    /// Executable to spawn; defaults to `gradle` on the PATH.
    executable: PathBuf,

    /// Free arguments prepended to every invocation.
    arguments: Vec<String>,
}

impl Default for GradleSection {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("gradle"),
            arguments: Vec::new(),
        }
    }
}

/// Diagnostic report as emitted by `diagnose --json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    /// RFC 3339 timestamp the report was generated at.
    generated_at: String,

    /// Diagnostic lines, one per detected pattern.
    diagnostics: &'a [String],

    /// `true` when no known pattern matched.
    unclassified: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing subscriber
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = run_command(cli.command) {
        // Log with tracing
        error!("Command failed: {:#}", e);
        // Also print to stderr for CLI users
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for structured logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("gradlekit=debug,gradlekit_core=debug,gradlekit_diagnose=debug")
    } else {
        EnvFilter::new("gradlekit=info,gradlekit_core=info,gradlekit_diagnose=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}

/// Execute the specified command
fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            tasks,
            project_dir,
            gradle,
            no_stacktrace,
            arguments,
        } => run_build(tasks, project_dir, gradle, no_stacktrace, arguments),
        Commands::Diagnose {
            tasks,
            project_dir,
            gradle,
            json,
        } => run_diagnose(tasks, project_dir, gradle, json),
    }
}

/// Run the `run` command
fn run_build(
    tasks: Vec<String>,
    project_dir: Option<PathBuf>,
    gradle: Option<PathBuf>,
    no_stacktrace: bool,
    arguments: Vec<String>,
) -> Result<()> {
    let project_root = resolve_project_root(project_dir)?;
    let config = load_config(&project_root).context("Failed to load gradlekit configuration")?;

    info!("Project root: {}", project_root.display());

    let mut executer = executer_for(&project_root, &config, gradle);
    executer
        .with_arguments(config.gradle.arguments.clone())
        .with_tasks(tasks);
    for argument in arguments {
        executer.with_argument(argument);
    }
    if no_stacktrace {
        executer.with_stacktrace_disabled();
    }

    let result = executer.run().context("Build failed")?;
    println!("{}", result.output);

    Ok(())
}

/// Run the `diagnose` command
fn run_diagnose(
    tasks: Vec<String>,
    project_dir: Option<PathBuf>,
    gradle: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let project_root = resolve_project_root(project_dir)?;
    let config = load_config(&project_root).context("Failed to load gradlekit configuration")?;

    let mut executer = executer_for(&project_root, &config, gradle);
    executer
        .with_arguments(config.gradle.arguments.clone())
        .with_tasks(tasks);

    let failure = executer
        .run_with_failure()
        .context("Expected the build to fail")?;
    let report = diagnose(&failure.root_cause);

    if json {
        let rendered = serde_json::to_string_pretty(&JsonReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            diagnostics: &report.lines,
            unclassified: report.is_empty(),
        })
        .context("Failed to render JSON report")?;
        println!("{rendered}");
        return Ok(());
    }

    if report.is_empty() {
        println!("No known failure patterns matched.");
        println!("\nRaw failure output:\n{}", failure.output);
    } else {
        for line in &report.lines {
            println!("- {line}");
        }
    }

    Ok(())
}

fn executer_for(
    project_root: &Path,
    config: &CliConfig,
    gradle: Option<PathBuf>,
) -> ForkingExecuter {
    let executable = gradle.unwrap_or_else(|| config.gradle.executable.clone());
    ForkingExecuter::with_runner(
        project_root,
        Arc::new(GradleCommandRunner::new(executable)),
    )
}

fn resolve_project_root(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    match project_dir {
        Some(directory) => Ok(directory),
        None => {
            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            find_project_root(&current_dir)
        }
    }
}

/// Find the project root by searching upward for a settings file
fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut path = start;
    loop {
        if path.join(SETTINGS_FILE_NAME).is_file()
            || path.join(SETTINGS_SCRIPT_FILE_NAME).is_file()
        {
            return Ok(path.to_path_buf());
        }

        match path.parent() {
            Some(parent) => path = parent,
            None => {
                anyhow::bail!("Not a Gradle project (no settings file up to the mount point)")
            }
        }
    }
}

/// Load gradlekit configuration from `gradlekit.toml`, with defaults
fn load_config(project_root: &Path) -> Result<CliConfig> {
    let config_file = project_root.join("gradlekit.toml");
    if !config_file.exists() {
        return Ok(CliConfig::default());
    }

    let content = std::fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_file.display()))
}
