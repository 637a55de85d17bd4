use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// A planned route: the node sequence from start to goal inclusive, its
/// summed edge weight, and how long the search took.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<NodeId>,
    total_cost: f64,
    elapsed: Duration,
}

impl Route {
    pub(crate) fn new(nodes: Vec<NodeId>, total_cost: f64, elapsed: Duration) -> Route {
        Route {
            nodes,
            total_cost,
            elapsed,
        }
    }

    /// Node ids in traversal order. The first entry is the start, the last
    /// the goal; a route from a node to itself holds that node once.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Sum of the traversed edge weights, in meters.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Wall-clock duration of the planning call. Informational only; it
    /// never participates in cost comparisons.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}
