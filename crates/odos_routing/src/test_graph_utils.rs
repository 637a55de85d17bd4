use crate::attributes::{EdgeAttributes, NodeAttributes};
use crate::graph::{NodeId, RoadGraph};

/// Build a graph from coordinate-only nodes and explicit edge lengths in
/// meters. Lengths in tests should stay at or above the great-circle
/// distance between their endpoints so the remaining-cost estimate never
/// overestimates.
pub(crate) fn graph_with(
    nodes: &[(NodeId, f64, f64)],
    edges: &[(NodeId, NodeId, f64)],
) -> RoadGraph {
    let mut graph = RoadGraph::new();

    for &(node, lat, lon) in nodes {
        graph.add_node(node, NodeAttributes::at(lat, lon));
    }
    for &(from, to, length) in edges {
        graph
            .add_edge(from, to, EdgeAttributes::with_length(length))
            .unwrap();
    }

    graph
}

/// Four corners of a roughly 55 m square, wired as the one-way cycle
/// 1 -> 2 -> 3 -> 4 -> 1 with 100 m edges.
pub(crate) fn directed_square() -> RoadGraph {
    graph_with(
        &[
            (1, 0.0, 0.0),
            (2, 0.0005, 0.0),
            (3, 0.0005, 0.0005),
            (4, 0.0, 0.0005),
        ],
        &[
            (1, 2, 100.0),
            (2, 3, 100.0),
            (3, 4, 100.0),
            (4, 1, 100.0),
        ],
    )
}
