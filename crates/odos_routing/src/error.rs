use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, RoutingError>;

/// Failures surfaced while building or querying a road graph.
///
/// Every variant points at the caller's input or at a gap in the loaded map
/// data; retrying the same call yields the same outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// A node required by the remaining-cost estimate has no resolvable
    /// latitude/longitude pair.
    #[error("node {node} has no resolvable coordinate pair")]
    MissingCoordinate { node: NodeId },

    /// The referenced node id is not part of the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode { node: NodeId },

    /// An edge on the search frontier carries no usable weight under the
    /// active weight policy.
    #[error("edge {from} -> {to} has no usable weight attribute")]
    MissingEdgeWeight { from: NodeId, to: NodeId },

    /// Every node reachable from the start was expanded without touching
    /// the goal.
    #[error("no path found from {start} to {goal}")]
    NoPathFound { start: NodeId, goal: NodeId },
}
