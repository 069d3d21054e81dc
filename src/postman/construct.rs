//! Initial solution: a randomised covering walk.

use std::collections::HashSet;

use rand::Rng;

use super::walk::Walk;
use crate::error::{PostmanError, Result};
use crate::graph::{EdgeId, Graph, PathFinder, VertexId};

/// Builds a closed walk from `start` that covers every edge of `graph`.
///
/// From the current vertex an unused incident edge is taken uniformly at
/// random. When none is left, the walk detours along a fewest-hop path to
/// the nearest vertex that still has one. Once every edge is used the walk
/// returns to `start` along a fewest-hop path. The result is a valid
/// starting state, not a short one.
pub fn find_first_solution<R: Rng>(graph: &Graph, start: VertexId, rng: &mut R) -> Result<Walk> {
    if !graph.contains_vertex(start) {
        return Err(PostmanError::StartVertexNotInGraph(start));
    }

    let finder = PathFinder::new(graph);
    // the graph is never touched; the pool of unused edges lives here
    let mut used: HashSet<EdgeId> = HashSet::with_capacity(graph.edge_count());
    let mut remaining = graph.edge_count();
    let mut edges = Vec::with_capacity(graph.edge_count() * 2);
    let mut at = start;

    while remaining > 0 {
        let unused: Vec<EdgeId> = graph
            .incident_edges(at)?
            .iter()
            .copied()
            .filter(|e| !used.contains(e))
            .collect();

        if unused.is_empty() {
            let (next, detour) = finder.nearest_with_unused_edge(at, &used)?;
            edges.extend(detour);
            at = next;
            continue;
        }

        let edge = unused[rng.random_range(0..unused.len())];
        used.insert(edge);
        remaining -= 1;
        edges.push(edge);
        at = graph.other_endpoint(edge, at)?;
    }

    edges.extend(finder.hop_path(at, start)?);
    Ok(Walk::new(start, edges))
}
