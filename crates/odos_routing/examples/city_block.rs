//! Plan a walk across a hand-built block of central Paris.
//!
//! Run with `cargo run --example city_block`.

use odos_routing::{
    EdgeAttributes, GeoPoint, LocationIndex, NodeAttributes, NodeId, Result, RoadGraph,
    RoutePlanner,
};
use tracing::Level;

fn build_neighbourhood() -> Result<RoadGraph> {
    let mut graph = RoadGraph::new();

    // Junctions around the Hotel de Ville, coordinates straight from the map.
    let junctions: [(NodeId, f64, f64); 6] = [
        (1, 48.8573, 2.3508),
        (2, 48.8577, 2.3522),
        (3, 48.8581, 2.3536),
        (4, 48.8566, 2.3529),
        (5, 48.8570, 2.3543),
        (6, 48.8586, 2.3551),
    ];
    for (node, lat, lon) in junctions {
        graph.add_node(node, NodeAttributes::at(lat, lon));
    }

    // Street segments with surveyed lengths in meters, both directions.
    let streets: [(NodeId, NodeId, f64); 7] = [
        (1, 2, 115.0),
        (2, 3, 115.0),
        (2, 4, 135.0),
        (3, 6, 125.0),
        (4, 5, 115.0),
        (5, 3, 135.0),
        (5, 6, 190.0),
    ];
    for (a, b, length) in streets {
        graph.add_edge(a, b, EdgeAttributes::with_length(length))?;
        graph.add_edge(b, a, EdgeAttributes::with_length(length))?;
    }

    Ok(graph)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let graph = build_neighbourhood()?;
    let planner = RoutePlanner::new(&graph);
    println!("{planner}");

    let index = LocationIndex::build_from_graph(&graph);

    // Somewhere near junction 1 and somewhere near junction 6.
    let pickup = GeoPoint::new(48.8572, 2.3510);
    let dropoff = GeoPoint::new(48.8585, 2.3549);

    let start = index.nearest_node(&pickup).unwrap();
    let goal = index.nearest_node(&dropoff).unwrap();
    println!("snapped pickup to node {start}, dropoff to node {goal}");

    let route = planner.plan(start, goal)?;
    println!(
        "route {:?} covers {:.0} m in {} hops (planned in {:?})",
        route.nodes(),
        route.total_cost(),
        route.hop_count(),
        route.elapsed()
    );

    Ok(())
}
