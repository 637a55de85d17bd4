use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::attributes::WeightPolicy;
use crate::error::{Result, RoutingError};
use crate::graph::{NodeId, RoadGraph};
use crate::route::Route;
use crate::stopwatch::Stopwatch;

// https://en.wikipedia.org/wiki/A*_search_algorithm

/// One candidate expansion on the open set.
#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node: NodeId,

    /// Cheapest known cost from the start to `node` when the entry was
    /// pushed.
    g_score: f64,

    /// g_score plus the remaining-cost estimate from `node` to the goal.
    f_score: f64,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip the comparison to make the heap a min-heap. Ties on the
        // estimate break by lower cost-from-start, then lower node id, so
        // expansion order does not depend on insertion order.
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.g_score.total_cmp(&self.g_score))
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// A* route planner over a borrowed [`RoadGraph`].
///
/// The planner never mutates the graph and keeps no state between calls;
/// every [`RoutePlanner::plan`] allocates its own search structures.
/// Planning from several threads over one graph is safe as long as nothing
/// mutates the graph concurrently; the planner itself adds no
/// synchronization and no internal timeout, so callers needing a time bound
/// must enforce one around the call.
pub struct RoutePlanner<'g> {
    graph: &'g RoadGraph,
    weight_policy: WeightPolicy,
}

impl<'g> RoutePlanner<'g> {
    /// A planner with the default weight policy: every traversed edge must
    /// carry a `length`.
    pub fn new(graph: &'g RoadGraph) -> RoutePlanner<'g> {
        Self::with_weight_policy(graph, WeightPolicy::default())
    }

    pub fn with_weight_policy(
        graph: &'g RoadGraph,
        weight_policy: WeightPolicy,
    ) -> RoutePlanner<'g> {
        RoutePlanner {
            graph,
            weight_policy,
        }
    }

    /// Remaining-cost estimate between two nodes: the great-circle distance
    /// between their coordinates, in meters. Never overestimates the road
    /// distance, which is what makes the returned routes cost-optimal.
    pub fn heuristic(&self, from: NodeId, to: NodeId) -> Result<f64> {
        let from_point = self.graph.node_coordinates(from)?;
        let to_point = self.graph.node_coordinates(to)?;

        Ok(from_point.haversine_distance(&to_point))
    }

    /// Find the lowest-cost route from `start` to `goal`.
    ///
    /// Both endpoints are validated before the search starts. A start equal
    /// to the goal yields a single-node route of cost zero without touching
    /// the open set.
    pub fn plan(&self, start: NodeId, goal: NodeId) -> Result<Route> {
        let stopwatch = Stopwatch::new("planner/plan");

        if !self.graph.contains_node(start) {
            return Err(RoutingError::UnknownNode { node: start });
        }
        if !self.graph.contains_node(goal) {
            return Err(RoutingError::UnknownNode { node: goal });
        }

        if start == goal {
            return Ok(Route::new(vec![start], 0.0, stopwatch.elapsed()));
        }

        let mut open_set: BinaryHeap<HeapItem> = BinaryHeap::new();
        let mut came_from: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut g_score: FxHashMap<NodeId, f64> = FxHashMap::default();
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();

        g_score.insert(start, 0.0);
        open_set.push(HeapItem {
            node: start,
            g_score: 0.0,
            f_score: self.heuristic(start, goal)?,
        });

        let mut iterations = 0_usize;

        while let Some(HeapItem {
            node: current,
            g_score: current_g,
            ..
        }) = open_set.pop()
        {
            iterations += 1;

            if current == goal {
                stopwatch.report();
                debug!(
                    "reached goal {} after settling {} nodes in {} iterations",
                    goal,
                    visited.len(),
                    iterations
                );

                let path = reconstruct_path(&came_from, current);
                return Ok(Route::new(path, current_g, stopwatch.elapsed()));
            }

            // Stale entry left behind by a later, cheaper push for the same
            // node. Skip it.
            if !visited.insert(current) {
                continue;
            }

            for edge in self.graph.successors(current) {
                let neighbour = edge.to();
                let weight = edge
                    .attributes()
                    .weight(self.weight_policy)
                    .ok_or(RoutingError::MissingEdgeWeight {
                        from: current,
                        to: neighbour,
                    })?;

                let tentative_g = current_g + weight;
                let known = g_score.get(&neighbour).copied().unwrap_or(f64::INFINITY);

                if tentative_g < known {
                    came_from.insert(neighbour, current);
                    g_score.insert(neighbour, tentative_g);
                    open_set.push(HeapItem {
                        node: neighbour,
                        g_score: tentative_g,
                        f_score: tentative_g + self.heuristic(neighbour, goal)?,
                    });
                }
            }
        }

        debug!(
            "open set exhausted after settling {} nodes in {} iterations",
            visited.len(),
            iterations
        );

        Err(RoutingError::NoPathFound { start, goal })
    }
}

impl fmt::Display for RoutePlanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RoutePlanner(nodes = {}, edges = {})",
            self.graph.node_count(),
            self.graph.edge_count()
        )
    }
}

/// Walk the predecessor links from `last` back to the start, then reverse
/// into traversal order.
fn reconstruct_path(came_from: &FxHashMap<NodeId, NodeId>, last: NodeId) -> Vec<NodeId> {
    let mut path = Vec::with_capacity(32);
    path.push(last);

    let mut current = last;
    while let Some(&parent) = came_from.get(&current) {
        current = parent;
        path.push(current);
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{EdgeAttributes, NodeAttributes};
    use crate::test_graph_utils::{directed_square, graph_with};

    #[test]
    fn trivial_plan_is_a_single_node() {
        let graph = directed_square();
        let planner = RoutePlanner::new(&graph);

        let route = planner.plan(1, 1).unwrap();

        assert_eq!(route.nodes(), [1]);
        assert_eq!(route.total_cost(), 0.0);
        assert_eq!(route.hop_count(), 0);
    }

    #[test]
    fn square_route_follows_the_cycle() {
        let graph = directed_square();
        let planner = RoutePlanner::new(&graph);

        let route = planner.plan(1, 3).unwrap();

        assert_eq!(route.nodes(), [1, 2, 3]);
        assert_eq!(route.total_cost(), 200.0);
    }

    #[test]
    fn one_way_cycle_forces_the_long_way_round() {
        let graph = directed_square();
        let planner = RoutePlanner::new(&graph);

        let route = planner.plan(1, 4).unwrap();

        assert_eq!(route.nodes(), [1, 2, 3, 4]);
        assert_eq!(route.total_cost(), 300.0);
    }

    #[test]
    fn cheaper_total_beats_a_promising_first_hop() {
        // The first hop towards node 2 lies on the straight line to the
        // goal, so the search expands it first. The route through node 3
        // is still cheaper overall and must win.
        let graph = graph_with(
            &[
                (1, 0.0, 0.0),
                (2, 0.0, 0.001),
                (3, 0.001, 0.001),
                (4, 0.0, 0.002),
            ],
            &[(1, 2, 120.0), (2, 4, 400.0), (1, 3, 160.0), (3, 4, 160.0)],
        );
        let planner = RoutePlanner::new(&graph);

        let route = planner.plan(1, 4).unwrap();

        assert_eq!(route.nodes(), [1, 3, 4]);
        assert_eq!(route.total_cost(), 320.0);
    }

    #[test]
    fn stale_open_set_entries_are_filtered() {
        // Node 3 is first queued with cost 400 via the direct edge, then
        // improved to 240 via node 2. The stale 400 entry surfaces before
        // the goal and must be skipped, not re-expanded.
        let graph = graph_with(
            &[
                (1, 0.0, 0.0),
                (2, 0.0, 0.001),
                (3, 0.0, 0.002),
                (4, 0.0, 0.003),
            ],
            &[(1, 3, 400.0), (1, 2, 120.0), (2, 3, 120.0), (3, 4, 300.0)],
        );
        let planner = RoutePlanner::new(&graph);

        let route = planner.plan(1, 4).unwrap();

        assert_eq!(route.nodes(), [1, 2, 3, 4]);
        assert_eq!(route.total_cost(), 540.0);
    }

    #[test]
    fn equal_cost_routes_resolve_to_the_lower_node_id() {
        let graph = graph_with(
            &[
                (1, 0.0, 0.0),
                (2, 0.0005, 0.001),
                (3, -0.0005, 0.001),
                (4, 0.0, 0.002),
            ],
            &[(1, 2, 130.0), (1, 3, 130.0), (2, 4, 130.0), (3, 4, 130.0)],
        );
        let planner = RoutePlanner::new(&graph);

        let route = planner.plan(1, 4).unwrap();

        assert_eq!(route.nodes(), [1, 2, 4]);
        assert_eq!(route.total_cost(), 260.0);
    }

    #[test]
    fn unreachable_goal_is_no_path_found() {
        let graph = graph_with(
            &[(1, 0.0, 0.0), (2, 0.0, 0.001)],
            &[(2, 1, 120.0)],
        );
        let planner = RoutePlanner::new(&graph);

        let error = planner.plan(1, 2).unwrap_err();
        assert_eq!(error, RoutingError::NoPathFound { start: 1, goal: 2 });
    }

    #[test]
    fn endpoints_are_validated_before_the_search() {
        let graph = directed_square();
        let planner = RoutePlanner::new(&graph);

        assert_eq!(
            planner.plan(99, 1).unwrap_err(),
            RoutingError::UnknownNode { node: 99 }
        );
        assert_eq!(
            planner.plan(1, 99).unwrap_err(),
            RoutingError::UnknownNode { node: 99 }
        );
    }

    #[test]
    fn a_weightless_edge_on_the_frontier_is_an_error() {
        let mut graph = graph_with(&[(1, 0.0, 0.0), (2, 0.0, 0.001)], &[]);
        graph.add_edge(1, 2, EdgeAttributes::new()).unwrap();
        let planner = RoutePlanner::new(&graph);

        let error = planner.plan(1, 2).unwrap_err();
        assert_eq!(error, RoutingError::MissingEdgeWeight { from: 1, to: 2 });
    }

    #[test]
    fn distance_fallback_requires_the_opt_in_policy() {
        let mut graph = graph_with(&[(1, 0.0, 0.0), (2, 0.0, 0.001)], &[]);
        let mut attributes = EdgeAttributes::new();
        attributes.insert("distance", 150.0);
        graph.add_edge(1, 2, attributes).unwrap();

        let strict = RoutePlanner::new(&graph);
        assert_eq!(
            strict.plan(1, 2).unwrap_err(),
            RoutingError::MissingEdgeWeight { from: 1, to: 2 }
        );

        let lenient = RoutePlanner::with_weight_policy(&graph, WeightPolicy::LengthOrDistance);
        let route = lenient.plan(1, 2).unwrap();
        assert_eq!(route.nodes(), [1, 2]);
        assert_eq!(route.total_cost(), 150.0);
    }

    #[test]
    fn a_goal_without_coordinates_fails_up_front() {
        let mut graph = graph_with(&[(1, 0.0, 0.0)], &[]);
        graph.add_node(2, NodeAttributes::new());
        graph.add_edge(1, 2, EdgeAttributes::with_length(100.0)).unwrap();
        let planner = RoutePlanner::new(&graph);

        let error = planner.plan(1, 2).unwrap_err();
        assert_eq!(error, RoutingError::MissingCoordinate { node: 2 });
    }

    #[test]
    fn a_bare_node_on_the_frontier_fails_the_search() {
        let mut graph = graph_with(&[(1, 0.0, 0.0), (3, 0.0, 0.002)], &[]);
        graph.add_node(2, NodeAttributes::new());
        graph.add_edge(1, 2, EdgeAttributes::with_length(120.0)).unwrap();
        graph.add_edge(2, 3, EdgeAttributes::with_length(120.0)).unwrap();
        let planner = RoutePlanner::new(&graph);

        let error = planner.plan(1, 3).unwrap_err();
        assert_eq!(error, RoutingError::MissingCoordinate { node: 2 });
    }

    #[test]
    fn heuristic_is_the_great_circle_distance() {
        let graph = directed_square();
        let planner = RoutePlanner::new(&graph);

        let estimate = planner.heuristic(1, 2).unwrap();
        assert!((estimate - 55.6).abs() < 0.1, "got {estimate}");

        assert_eq!(planner.heuristic(1, 1).unwrap(), 0.0);
        assert_eq!(
            planner.heuristic(1, 99).unwrap_err(),
            RoutingError::UnknownNode { node: 99 }
        );
    }

    #[test]
    fn display_reports_the_graph_size() {
        let graph = directed_square();
        let planner = RoutePlanner::new(&graph);

        assert_eq!(format!("{planner}"), "RoutePlanner(nodes = 4, edges = 4)");
    }

    #[test]
    fn heap_orders_by_estimate_then_cost_then_node() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapItem { node: 5, g_score: 10.0, f_score: 30.0 });
        heap.push(HeapItem { node: 9, g_score: 5.0, f_score: 20.0 });
        heap.push(HeapItem { node: 2, g_score: 12.0, f_score: 20.0 });
        heap.push(HeapItem { node: 7, g_score: 5.0, f_score: 20.0 });

        // f wins first, then lower g, then lower id.
        assert_eq!(heap.pop().unwrap().node, 7);
        assert_eq!(heap.pop().unwrap().node, 9);
        assert_eq!(heap.pop().unwrap().node, 2);
        assert_eq!(heap.pop().unwrap().node, 5);
    }
}
