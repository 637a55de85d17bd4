use rstar::RTree;
use rstar::primitives::GeomWithData;
use tracing::debug;

use crate::geopoint::GeoPoint;
use crate::graph::{NodeId, RoadGraph};

type IndexedNode = GeomWithData<GeoPoint, NodeId>;

/// Spatial index answering which graph node lies closest to a coordinate.
///
/// Built once per graph. Nodes without a resolvable coordinate pair are not
/// indexed and can never be returned.
pub struct LocationIndex {
    tree: RTree<IndexedNode>,
}

impl LocationIndex {
    /// Bulk-load the index from every locatable node of `graph`.
    pub fn build_from_graph(graph: &RoadGraph) -> LocationIndex {
        let nodes: Vec<IndexedNode> = graph
            .nodes()
            .filter_map(|(node, attributes)| {
                attributes
                    .coordinates()
                    .map(|point| IndexedNode::new(point, node))
            })
            .collect();

        debug!(
            "location index holds {} of {} nodes",
            nodes.len(),
            graph.node_count()
        );

        LocationIndex {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Node id nearest to `point` by great-circle distance, or `None` when
    /// the index is empty.
    pub fn nearest_node(&self, point: &GeoPoint) -> Option<NodeId> {
        self.tree
            .nearest_neighbor(&[point.lon(), point.lat()])
            .map(|indexed| indexed.data)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
