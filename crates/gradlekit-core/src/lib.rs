//! Gradlekit core - a harness driving Gradle during integration tests.
//!
//! This crate provides the invocation model and execution engine for
//! driving Gradle builds from tests: an immutable configuration compiled
//! into an argument vector, settings-file resolution, two executers with
//! lifecycle hooks, and Maven-local isolation for shared executers.
//!
//! # Architecture
//!
//! - [`config`]: Immutable invocation configuration and console modes
//! - [`error`]: Error types and result type alias
//! - [`settings`]: Settings-file resolution and fabrication
//! - [`arguments`]: Compilation of the ordered argument vector
//! - [`executer`]: The executer capability set and its two variants
//! - [`isolation`]: Maven-local isolation guard
//! - [`tools`]: Adapter traits for the external collaborators
//!
//! # Example
//!
//! ```no_run
//! use gradlekit_core::{ForkingExecuter, GradleExecuter};
//! use gradlekit_diagnose::diagnose;
//!
//! # fn main() -> gradlekit_core::Result<()> {
//! let mut executer = ForkingExecuter::new("/tmp/test-dir");
//! let failure = executer.with_tasks(["assemble"]).run_with_failure()?;
//!
//! let report = diagnose(&failure.root_cause);
//! for line in &report.lines {
//!     eprintln!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod arguments;
pub mod config;
pub mod error;
pub mod executer;
pub mod isolation;
pub mod settings;
pub mod tools;

// Re-export core types for convenience
pub use arguments::compile_arguments;
pub use config::{ConsoleOutput, GradleInvocation};
pub use error::{HarnessError, Result};
pub use executer::{
    EmbeddedExecuter, ExecutionFailure, ExecutionResult, ForkingExecuter, GradleExecuter,
};
pub use isolation::MavenLocalGuard;
pub use settings::{SettingsResolution, resolve_settings_file};
