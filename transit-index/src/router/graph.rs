//! Directed weighted graph.
//!
//! A flat edge arena plus per-vertex incidence lists of edge ids. Edge
//! ids are assigned in insertion order, so two builds over the same
//! catalogue produce identical graphs. The graph is frozen once the
//! shortest-path engine consumes it; nothing here mutates after that.

/// Vertex index. Two vertices exist per stop: wait-start (arrival) and
/// wait-end (departure after the dwell interval).
pub type VertexId = usize;

/// Edge index into the graph's edge arena.
pub type EdgeId = usize;

/// A directed edge with a time weight in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// Directed weighted graph over a fixed vertex set.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Append an edge, returning its id. Ids are dense and sequential.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        debug_assert!(edge.from < self.vertex_count() && edge.to < self.vertex_count());
        let id = self.edges.len();
        self.incidence[edge.from].push(id);
        self.edges.push(edge);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ids of edges leaving a vertex, in insertion order.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incidence[vertex].iter().copied()
    }
}
