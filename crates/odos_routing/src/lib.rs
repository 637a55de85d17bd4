//! Lowest-cost route planning over geographic road graphs.
//!
//! The crate is organized around a directed [`graph::RoadGraph`] whose
//! nodes and edges carry attribute maps, and an A* [`planner::RoutePlanner`]
//! that searches it. Edge weights are lengths in meters; the remaining-cost
//! estimate is the great-circle distance between node coordinates, so the
//! planner returns cost-optimal routes whenever edge lengths are physical
//! distances.
//!
//! Graphs are produced by a map-loading collaborator and handed over fully
//! prepared: parallel edges reduced to the shortest one, every edge carrying
//! a usable weight. [`location_index::LocationIndex`] snaps free-floating
//! coordinates to graph nodes so callers can plan between places instead of
//! raw node ids.

pub mod attributes;
pub mod error;
pub mod geopoint;
pub mod graph;
pub mod location_index;
pub mod planner;
pub mod route;
pub mod stopwatch;

#[cfg(test)]
pub(crate) mod test_graph_utils;

pub use attributes::{AttributeValue, EdgeAttributes, NodeAttributes, WeightPolicy};
pub use error::{Result, RoutingError};
pub use geopoint::{GeoPoint, haversine_distance};
pub use graph::{NodeId, RoadEdge, RoadGraph};
pub use location_index::LocationIndex;
pub use planner::RoutePlanner;
pub use route::Route;
pub use stopwatch::Stopwatch;
