//! Post-mortem diagnostics for failed Gradle invocations.
//!
//! This crate models the cause graph a failed build exposes, recovers
//! that graph from captured console output when the build ran in a
//! separate process, and classifies known failure patterns into an
//! actionable diagnostic report.
//!
//! # Example
//!
//! ```
//! use gradlekit_diagnose::{BuildCause, diagnose};
//!
//! let failure = BuildCause::new("Execution failed for task ':compileJava'.")
//!     .with_chained(BuildCause::new(
//!         "Could not find dev.gradleplugins:gradle-api:6.0.",
//!     ));
//!
//! let report = diagnose(&failure);
//! assert_eq!(report.lines.len(), 1);
//! ```

pub mod cause;
pub mod classifiers;
pub mod output;
pub mod report;
pub mod visitor;

// Re-export the types most callers need
pub use cause::BuildCause;
pub use classifiers::{MissingPluginArtifacts, MissingRuntimeDependencies};
pub use output::parse_failure_output;
pub use report::{DiagnosticReport, diagnose};
pub use visitor::{CauseVisitor, CompositeVisitor, walk_causes};
