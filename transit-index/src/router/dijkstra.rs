//! Preprocessed shortest-path structure.
//!
//! One Dijkstra pass per source vertex over the frozen graph, run once
//! at construction. Queries then read the table: amortized over the
//! unlimited queries of the serve phase, preprocessing pays for itself
//! after the first handful.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// Shortest path between two vertices: total weight and the edge ids
/// along it, in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSummary {
    pub weight: f64,
    pub edges: Vec<EdgeId>,
}

/// How a vertex was reached from a fixed source.
#[derive(Debug, Clone, Copy)]
struct Reach {
    weight: f64,
    /// Edge taken into this vertex; `None` only at the source itself.
    prev_edge: Option<EdgeId>,
}

/// Heap entry for Dijkstra's algorithm. Ordered as a min-heap on
/// weight via reversed `total_cmp`.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    weight: f64,
    vertex: VertexId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// All-pairs shortest paths over a frozen graph.
///
/// Immutable after construction; `route` never mutates shared state,
/// so concurrent read-only querying needs no synchronization.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// `table[source][target]` is `None` when unreachable.
    table: Vec<Vec<Option<Reach>>>,
}

impl ShortestPaths {
    /// Run the preprocessing over every source vertex.
    pub fn preprocess(graph: &DirectedWeightedGraph) -> Self {
        let n = graph.vertex_count();
        let table = (0..n).map(|source| Self::from_source(graph, source)).collect();
        debug!(vertices = n, edges = graph.edge_count(), "shortest-path table built");
        Self { table }
    }

    fn from_source(graph: &DirectedWeightedGraph, source: VertexId) -> Vec<Option<Reach>> {
        let mut reach: Vec<Option<Reach>> = vec![None; graph.vertex_count()];
        reach[source] = Some(Reach {
            weight: 0.0,
            prev_edge: None,
        });

        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            weight: 0.0,
            vertex: source,
        });

        while let Some(Candidate { weight, vertex }) = heap.pop() {
            // Stale entry: a shorter way to this vertex was settled.
            match reach[vertex] {
                Some(r) if r.weight < weight => continue,
                _ => {}
            }

            for edge_id in graph.edges_from(vertex) {
                let edge = graph.edge(edge_id);
                let next_weight = weight + edge.weight;
                let better = match reach[edge.to] {
                    None => true,
                    Some(r) => next_weight < r.weight,
                };
                if better {
                    reach[edge.to] = Some(Reach {
                        weight: next_weight,
                        prev_edge: Some(edge_id),
                    });
                    heap.push(Candidate {
                        weight: next_weight,
                        vertex: edge.to,
                    });
                }
            }
        }

        reach
    }

    /// Shortest path from one vertex to another, or `None` when the
    /// target is unreachable.
    pub fn route(
        &self,
        graph: &DirectedWeightedGraph,
        from: VertexId,
        to: VertexId,
    ) -> Option<PathSummary> {
        let row = &self.table[from];
        let weight = row[to]?.weight;

        let mut edges = Vec::new();
        let mut vertex = to;
        while let Some(edge_id) = row[vertex]?.prev_edge {
            edges.push(edge_id);
            vertex = graph.edge(edge_id).from;
        }
        edges.reverse();

        Some(PathSummary { weight, edges })
    }
}
