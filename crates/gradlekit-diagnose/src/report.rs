//! Consolidated diagnostic report over a build-failure cause graph.

use crate::cause::BuildCause;
use crate::classifiers::{MissingPluginArtifacts, MissingRuntimeDependencies};
use crate::visitor::{CompositeVisitor, walk_causes};
use serde::Serialize;
use std::fmt;

/// Diagnostic lines produced by the built-in classifiers.
///
/// An empty report means the failure matched no known pattern; the raw
/// failure is left for the caller to inspect and no error is raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    /// Rendered diagnostic lines, one per detected pattern.
    pub lines: Vec<String>,
}

impl DiagnosticReport {
    /// Returns `true` if no classifier matched.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Classifies a failure by walking its cause graph once.
///
/// Runs every built-in classifier through a single fan-out traversal and
/// collects their diagnostic lines. Classification is purely additive on
/// top of an already-captured failure and never fails itself.
///
/// # Arguments
///
/// * `root_cause` - Root of the failure's cause graph.
pub fn diagnose(root_cause: &BuildCause) -> DiagnosticReport {
    let mut plugin_artifacts = MissingPluginArtifacts::new();
    let mut runtime_dependencies = MissingRuntimeDependencies::new();
    {
        let mut composite =
            CompositeVisitor::new(vec![&mut plugin_artifacts, &mut runtime_dependencies]);
        walk_causes(root_cause, &mut composite);
    }

    let mut lines = plugin_artifacts.report();
    lines.extend(runtime_dependencies.report());
    DiagnosticReport { lines }
}
