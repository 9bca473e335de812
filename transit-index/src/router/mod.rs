//! The journey router.
//!
//! Transforms a finalized catalogue into a time-weighted directed
//! graph (two vertices per stop, wait and ride edges), preprocesses it
//! for shortest-path queries, and decodes raw edge paths back into
//! structured itineraries.

mod config;
mod dijkstra;
pub mod graph;

pub use config::RoutingSettings;
pub use dijkstra::{PathSummary, ShortestPaths};

use tracing::info;

use crate::catalogue::Catalogue;
use crate::domain::{RouteId, StopId};
use graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};

/// A road link below this length (metres) is treated as undeclared
/// when generating ride edges.
const MIN_LINK_M: f64 = 1e-4;

/// What a graph edge models, for decoding paths into itineraries.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EdgeKind {
    /// Dwell at a stop between arriving and departing.
    Wait { stop: StopId },
    /// Ride one route past `span` stops without disembarking.
    Ride { route: RouteId, span: usize },
}

/// Metadata for one graph edge, parallel to the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeInfo {
    kind: EdgeKind,
    minutes: f64,
}

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryItem {
    /// Wait at a stop for the configured dwell interval.
    Wait { stop: String, minutes: f64 },
    /// Ride a route for `span` stops.
    Bus {
        route: String,
        span: usize,
        minutes: f64,
    },
}

/// A complete point-to-point journey.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Total journey time in minutes; equals the sum of item times.
    pub total_minutes: f64,
    pub items: Vec<ItineraryItem>,
}

/// Graph plus preprocessed shortest paths plus per-edge metadata.
///
/// Built deterministically from catalogue insertion order: building
/// twice over an unmodified catalogue yields identical edge arenas,
/// which the persistence layer relies on.
#[derive(Debug, Clone)]
pub struct TransportRouter {
    settings: RoutingSettings,
    graph: DirectedWeightedGraph,
    paths: ShortestPaths,
    edge_info: Vec<EdgeInfo>,
}

impl TransportRouter {
    /// Build the routing graph from a finalized catalogue and
    /// preprocess it for queries.
    pub fn build(catalogue: &Catalogue, settings: RoutingSettings) -> Self {
        let stop_count = catalogue.stops().len();
        let mut graph = DirectedWeightedGraph::new(2 * stop_count);
        let mut edge_info = Vec::new();

        for stop_index in 0..stop_count {
            let stop = StopId(stop_index);
            graph.add_edge(Edge {
                from: wait_start(stop),
                to: wait_end(stop),
                weight: settings.bus_wait_time,
            });
            edge_info.push(EdgeInfo {
                kind: EdgeKind::Wait { stop },
                minutes: settings.bus_wait_time,
            });
        }

        for route_index in 0..catalogue.routes().len() {
            let route_id = RouteId(route_index);
            let route = catalogue.route(route_id);
            let mut path = route.traversal();
            if route.closes_loop() {
                path.push(path[0]);
            }
            add_ride_edges(catalogue, &settings, route_id, &path, &mut graph, &mut edge_info);
        }

        info!(
            stops = stop_count,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "routing graph built"
        );

        let paths = ShortestPaths::preprocess(&graph);
        Self {
            settings,
            graph,
            paths,
            edge_info,
        }
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    /// The frozen routing graph.
    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Find the fastest itinerary between two named stops.
    ///
    /// Returns `None` when either stop is unknown or no path exists;
    /// both are ordinary not-found outcomes.
    pub fn route(&self, catalogue: &Catalogue, from: &str, to: &str) -> Option<Itinerary> {
        let from = wait_start(catalogue.stop_id(from)?);
        let to = wait_start(catalogue.stop_id(to)?);

        let summary = self.paths.route(&self.graph, from, to)?;
        let items = summary
            .edges
            .iter()
            .map(|&edge_id| self.decode(catalogue, edge_id))
            .collect();

        Some(Itinerary {
            total_minutes: summary.weight,
            items,
        })
    }

    fn decode(&self, catalogue: &Catalogue, edge_id: EdgeId) -> ItineraryItem {
        let info = &self.edge_info[edge_id];
        match info.kind {
            EdgeKind::Wait { stop } => ItineraryItem::Wait {
                stop: catalogue.stop(stop).name.clone(),
                minutes: info.minutes,
            },
            EdgeKind::Ride { route, span } => ItineraryItem::Bus {
                route: catalogue.route(route).name.clone(),
                span,
                minutes: info.minutes,
            },
        }
    }
}

/// Arrival-side vertex of a stop.
fn wait_start(stop: StopId) -> VertexId {
    2 * stop.0
}

/// Departure-side vertex of a stop, after the dwell interval.
fn wait_end(stop: StopId) -> VertexId {
    2 * stop.0 + 1
}

/// Emit ride edges for one route's traversal path.
///
/// From every position `i`, edges run to every later position `j`
/// reachable over declared consecutive links, carrying the cumulative
/// distance. An undeclared link between distinct stops ends the
/// forward walk: a through-ride past it would have no defined length.
/// A stop repeated consecutively is a zero-length leg (unless a
/// self-distance was declared) and the walk continues through it.
fn add_ride_edges(
    catalogue: &Catalogue,
    settings: &RoutingSettings,
    route_id: RouteId,
    path: &[StopId],
    graph: &mut DirectedWeightedGraph,
    edge_info: &mut Vec<EdgeInfo>,
) {
    for i in 0..path.len().saturating_sub(1) {
        let mut cumulative = 0.0;
        for j in i + 1..path.len() {
            let link = if path[j - 1] == path[j] {
                catalogue.distance(path[j - 1], path[j]).unwrap_or(0.0)
            } else {
                match catalogue.distance(path[j - 1], path[j]) {
                    Some(d) if d > MIN_LINK_M => d,
                    _ => break,
                }
            };
            cumulative += link;
            let minutes = settings.ride_minutes(cumulative);
            graph.add_edge(Edge {
                from: wait_end(path[i]),
                to: wait_start(path[j]),
                weight: minutes,
            });
            edge_info.push(EdgeInfo {
                kind: EdgeKind::Ride {
                    route: route_id,
                    span: j - i,
                },
                minutes,
            });
        }
    }
}
