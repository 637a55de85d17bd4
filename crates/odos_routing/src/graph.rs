use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::attributes::{EdgeAttributes, NodeAttributes};
use crate::error::{Result, RoutingError};
use crate::geopoint::GeoPoint;

/// Identifier of a graph node. Opaque to the planner; wide enough for raw
/// OpenStreetMap node ids.
pub type NodeId = i64;

/// A directed edge, stored in the adjacency list of its source node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadEdge {
    to: NodeId,
    attributes: EdgeAttributes,
}

impl RoadEdge {
    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn attributes(&self) -> &EdgeAttributes {
        &self.attributes
    }
}

/// A simple directed road graph: attribute-carrying nodes and at most one
/// edge per (from, to) pair.
///
/// The graph is assembled by a map-loading collaborator and queried
/// read-only afterwards. Parallel edges between the same pair of nodes must
/// be reduced to the shortest one before insertion; [`RoadGraph::add_edge`]
/// keeps the graph simple by replacing the edge already stored for a pair.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    nodes: FxHashMap<NodeId, NodeAttributes>,
    outgoing: FxHashMap<NodeId, Vec<RoadEdge>>,
    edge_count: usize,
}

impl RoadGraph {
    pub fn new() -> RoadGraph {
        RoadGraph::default()
    }

    /// Insert a node, replacing the attributes of an existing one.
    pub fn add_node(&mut self, node: NodeId, attributes: NodeAttributes) {
        self.nodes.insert(node, attributes);
        self.outgoing.entry(node).or_default();
    }

    /// Insert a directed edge between two known nodes. An edge already
    /// stored for the same (from, to) pair is replaced, not duplicated.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, attributes: EdgeAttributes) -> Result<()> {
        if !self.nodes.contains_key(&from) {
            return Err(RoutingError::UnknownNode { node: from });
        }
        if !self.nodes.contains_key(&to) {
            return Err(RoutingError::UnknownNode { node: to });
        }

        let edges = self.outgoing.entry(from).or_default();
        match edges.iter_mut().find(|edge| edge.to == to) {
            Some(existing) => existing.attributes = attributes,
            None => {
                edges.push(RoadEdge { to, attributes });
                self.edge_count += 1;
            }
        }

        Ok(())
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Outgoing edges of `node`. Unknown ids have no successors.
    pub fn successors(&self, node: NodeId) -> &[RoadEdge] {
        self.outgoing.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_attributes(&self, node: NodeId) -> Option<&NodeAttributes> {
        self.nodes.get(&node)
    }

    /// Resolved coordinates of `node`.
    pub fn node_coordinates(&self, node: NodeId) -> Result<GeoPoint> {
        let attributes = self
            .nodes
            .get(&node)
            .ok_or(RoutingError::UnknownNode { node })?;

        attributes
            .coordinates()
            .ok_or(RoutingError::MissingCoordinate { node })
    }

    /// Iterate over every node id with its attributes, in no particular
    /// order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeAttributes)> {
        self.nodes.iter().map(|(node, attributes)| (*node, attributes))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
