//! Closed edge walks, the solution representation.

use std::collections::HashSet;

use crate::error::{PostmanError, Result};
use crate::graph::{EdgeId, Graph, VertexId};

/// An ordered sequence of edges forming a closed walk from `start` back to
/// `start`.
///
/// Edges may repeat; each occurrence counts towards the cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walk {
    start: VertexId,
    edges: Vec<EdgeId>,
}

impl Walk {
    pub fn new(start: VertexId, edges: Vec<EdgeId>) -> Self {
        Self { start, edges }
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<EdgeId> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of edge lengths over every occurrence, accumulated front to back
    /// so equal walks always give bit-identical costs.
    pub fn cost(&self, graph: &Graph) -> f64 {
        self.edges
            .iter()
            .fold(0.0, |acc, &e| acc + graph.edge(e).length())
    }

    /// Whether every edge of `graph` occurs at least once.
    pub fn covers(&self, graph: &Graph) -> bool {
        let seen: HashSet<EdgeId> = self.edges.iter().copied().collect();
        graph.edges().iter().all(|e| seen.contains(&e.id()))
    }

    /// Number of occurrences of `edge`.
    pub fn occurrences(&self, edge: EdgeId) -> usize {
        self.edges.iter().filter(|&&e| e == edge).count()
    }

    /// Vertices visited in order, starting and (for a closed walk) ending
    /// at `start`.
    ///
    /// Fails with [`PostmanError::NotIncident`] at the first edge that does
    /// not continue from the vertex reached so far.
    pub fn vertices(&self, graph: &Graph) -> Result<Vec<VertexId>> {
        let mut trail = Vec::with_capacity(self.edges.len() + 1);
        let mut at = self.start;
        trail.push(at);
        for &e in &self.edges {
            at = graph.other_endpoint(e, at)?;
            trail.push(at);
        }
        Ok(trail)
    }

    /// Whether the edges thread a continuous walk that returns to `start`.
    pub fn is_closed(&self, graph: &Graph) -> bool {
        matches!(self.vertices(graph), Ok(trail) if trail.last() == Some(&self.start))
    }

    /// Checks both solution invariants: full edge coverage and a closed,
    /// continuous traversal.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        let trail = self.vertices(graph)?;
        if let Some(&end) = trail.last().filter(|&&end| end != self.start) {
            return Err(PostmanError::OpenWalk {
                start: self.start,
                end,
            });
        }
        if let Some(missing) = graph
            .edges()
            .iter()
            .find(|e| !self.edges.contains(&e.id()))
        {
            let (a, b) = missing.endpoints();
            return Err(PostmanError::MissingEdge(a, b));
        }
        Ok(())
    }
}
