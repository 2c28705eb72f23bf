//! Cause-graph model for failed Gradle invocations.
//!
//! A failed build exposes its failure as a graph of [`BuildCause`] nodes:
//! each node carries a message, zero or more *aggregated* sibling causes
//! (the multi-cause fan-out Gradle reports for e.g. dependency resolution),
//! and at most one *chained* continuation cause.

use serde::Serialize;

/// One node in a build-failure cause graph.
///
/// The node owns its aggregated children and its chained continuation, so
/// the graph is a finite tree by construction; traversals over it always
/// terminate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCause {
    /// Failure message for this node.
    pub message: String,

    /// Aggregated sibling causes (multi-cause fan-out).
    pub causes: Vec<BuildCause>,

    /// Chained continuation cause, if any.
    pub cause: Option<Box<BuildCause>>,
}

impl BuildCause {
    /// Creates a leaf cause with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
            cause: None,
        }
    }

    /// Adds an aggregated sibling cause.
    ///
    /// # Arguments
    ///
    /// * `cause` - Cause to aggregate under this node.
    pub fn with_aggregated(mut self, cause: BuildCause) -> Self {
        self.causes.push(cause);
        self
    }

    /// Sets the chained continuation cause, replacing any previous one.
    ///
    /// # Arguments
    ///
    /// * `cause` - Continuation cause for this node.
    pub fn with_chained(mut self, cause: BuildCause) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}
