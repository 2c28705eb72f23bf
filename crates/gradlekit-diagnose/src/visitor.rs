//! Visitor traversal over build-failure cause graphs.
//!
//! This module defines the `CauseVisitor` trait implemented by failure
//! classifiers, the traversal order over a cause graph, and a fan-out
//! combinator that forwards every visited node to a list of delegates.

use crate::cause::BuildCause;

/// Visitor over the nodes of a cause graph.
///
/// Implementations accumulate evidence about the failure while the graph
/// is walked. A visitor must be infallible: an unrecognized node is simply
/// not evidence, never an error.
pub trait CauseVisitor {
    /// Inspects a single cause node.
    ///
    /// # Arguments
    ///
    /// * `cause` - The node currently being visited.
    fn visit(&mut self, cause: &BuildCause);
}

/// Walks a cause graph, feeding every node to the visitor.
///
/// For each node the traversal first descends depth-first into the
/// aggregated sibling causes, then visits the node itself, then follows
/// the chained continuation cause.
///
/// # Arguments
///
/// * `root` - Root node of the graph to walk.
/// * `visitor` - Visitor receiving every node.
pub fn walk_causes(root: &BuildCause, visitor: &mut dyn CauseVisitor) {
    for aggregated in &root.causes {
        walk_causes(aggregated, visitor);
    }
    visitor.visit(root);
    if let Some(chained) = &root.cause {
        walk_causes(chained, visitor);
    }
}

/// Fan-out visitor forwarding every node to a list of delegates.
///
/// Lets several classifiers observe a single traversal instead of walking
/// the graph once per classifier.
pub struct CompositeVisitor<'a> {
    delegates: Vec<&'a mut dyn CauseVisitor>,
}

impl<'a> CompositeVisitor<'a> {
    /// Creates a composite over the given delegates.
    ///
    /// Delegates are invoked in the order given, once per visited node.
    pub fn new(delegates: Vec<&'a mut dyn CauseVisitor>) -> Self {
        Self { delegates }
    }
}

impl CauseVisitor for CompositeVisitor<'_> {
    fn visit(&mut self, cause: &BuildCause) {
        for delegate in &mut self.delegates {
            delegate.visit(cause);
        }
    }
}
