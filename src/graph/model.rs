//! Vertices, edges and the graph that owns them.

use std::collections::HashMap;
use std::fmt;

use crate::error::{PostmanError, Result};

/// Stable identity of a vertex, chosen by whoever builds the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an edge, assigned by [`Graph::add_edge`] in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Position of the edge in [`Graph::edges`].
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A vertex and the edges incident to it.
///
/// The incidence list is filled in by [`Graph::add_edge`], never by the
/// vertex itself.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    edges: Vec<EdgeId>,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Incident edges in the order they were added.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// An undirected edge with a positive length. Immutable once created.
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    length: f64,
    first: VertexId,
    second: VertexId,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Both endpoints in storage order.
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.first, self.second)
    }

    pub fn is_incident(&self, vertex: VertexId) -> bool {
        self.first == vertex || self.second == vertex
    }

    /// Returns the endpoint opposite to `vertex`.
    pub fn other_endpoint(&self, vertex: VertexId) -> Result<VertexId> {
        if self.first == vertex {
            Ok(self.second)
        } else if self.second == vertex {
            Ok(self.first)
        } else {
            Err(PostmanError::NotIncident {
                edge: self.id,
                vertex,
            })
        }
    }

    /// Whether both edges join the same unordered vertex pair.
    pub fn same_pair(&self, other: &Edge) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }

    /// First endpoint of `self` (in storage order) that `other` also touches.
    pub fn shared_vertex(&self, other: &Edge) -> Option<VertexId> {
        if other.is_incident(self.first) {
            Some(self.first)
        } else if other.is_incident(self.second) {
            Some(self.second)
        } else {
            None
        }
    }
}

/// An undirected, edge-weighted graph.
///
/// The graph exclusively owns its vertices and edges; edges refer to
/// vertices by id. Solver runs only ever borrow it immutably, so one graph
/// can back many concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    index: HashMap<VertexId, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex with the given id.
    pub fn add_vertex(&mut self, id: usize) -> Result<VertexId> {
        let id = VertexId(id);
        if self.index.contains_key(&id) {
            return Err(PostmanError::DuplicateVertex(id));
        }
        self.index.insert(id, self.vertices.len());
        self.vertices.push(Vertex {
            id,
            edges: Vec::new(),
        });
        Ok(id)
    }

    /// Adds an undirected edge between two existing vertices.
    ///
    /// Parallel edges are accepted here; path reconstruction reports them
    /// as [`PostmanError::AmbiguousEdge`] when it runs into one.
    pub fn add_edge(&mut self, length: f64, first: VertexId, second: VertexId) -> Result<EdgeId> {
        // also rejects NaN
        if !(length > 0.0) || !length.is_finite() {
            return Err(PostmanError::NonPositiveLength(length));
        }
        let a = self.position(first)?;
        let b = self.position(second)?;
        if a == b {
            return Err(PostmanError::SelfLoop(first));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            length,
            first,
            second,
        });
        self.vertices[a].edges.push(id);
        self.vertices[b].edges.push(id);
        Ok(id)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges in insertion order; `edges()[id.index()]` is the edge `id`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.get(&id).map(|&i| &self.vertices[i])
    }

    /// Returns the edge with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different graph with fewer edges.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Dense index of a vertex into [`Graph::vertices`].
    pub fn position(&self, id: VertexId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(PostmanError::UnknownVertex(id))
    }

    /// Edges incident to `id`.
    pub fn incident_edges(&self, id: VertexId) -> Result<&[EdgeId]> {
        let pos = self.position(id)?;
        Ok(&self.vertices[pos].edges)
    }

    /// Endpoint of `edge` opposite to `vertex`.
    pub fn other_endpoint(&self, edge: EdgeId, vertex: VertexId) -> Result<VertexId> {
        self.edge(edge).other_endpoint(vertex)
    }

    /// The single edge joining `a` and `b`, found by intersecting their
    /// incidence lists.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        let from_b = self.incident_edges(b)?;
        let mut common = self
            .incident_edges(a)?
            .iter()
            .filter(|&&e| from_b.contains(&e));
        match (common.next(), common.next()) {
            (Some(&edge), None) => Ok(edge),
            (Some(_), Some(_)) => Err(PostmanError::AmbiguousEdge(a, b)),
            (None, _) => Err(PostmanError::MissingEdge(a, b)),
        }
    }

    /// Depth-first reachability check from the first vertex.
    ///
    /// The empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        if self.vertices.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![0usize];
        visited[0] = true;
        let mut reached = 0usize;

        while let Some(pos) = stack.pop() {
            reached += 1;
            let vertex = &self.vertices[pos];
            for &e in &vertex.edges {
                let edge = &self.edges[e.0];
                let next = if edge.first == vertex.id {
                    edge.second
                } else {
                    edge.first
                };
                let next_pos = self.index[&next];
                if !visited[next_pos] {
                    visited[next_pos] = true;
                    stack.push(next_pos);
                }
            }
        }
        reached == self.vertices.len()
    }

    /// Sum of all edge lengths, the lower bound for any covering walk.
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(|e| e.length).sum()
    }
}
