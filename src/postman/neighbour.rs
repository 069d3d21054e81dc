//! Neighbourhood move: drop one edge occurrence and reconnect the gap with
//! a shortest path.

use rand::Rng;

use super::walk::Walk;
use crate::error::{PostmanError, Result};
use crate::graph::{Edge, EdgeId, Graph, PathFinder, VertexId};

/// Removes a uniformly chosen edge occurrence from `walk` and bridges the
/// gap with a Dijkstra shortest path.
///
/// The result still covers every edge the input covered and is still a
/// closed walk from the same start vertex. An empty walk is returned as is.
pub fn generate_neighbour<R: Rng>(graph: &Graph, walk: &Walk, rng: &mut R) -> Result<Walk> {
    if walk.is_empty() {
        return Ok(walk.clone());
    }
    let index = rng.random_range(0..walk.len());
    splice_at(graph, walk, index)
}

/// Deterministic core of [`generate_neighbour`]: replaces the edge at
/// `index` with the shortest path between its endpoints.
///
/// If the removed edge occurs nowhere else in the new walk, it is appended
/// twice after the bridge (there and back) so it stays covered.
///
/// Fails with [`PostmanError::IndexOutOfRange`] if `index >= walk.len()`.
pub fn splice_at(graph: &Graph, walk: &Walk, index: usize) -> Result<Walk> {
    let edges = walk.edges();
    let removed_id = *edges.get(index).ok_or(PostmanError::IndexOutOfRange {
        index,
        len: edges.len(),
    })?;
    let removed = graph.edge(removed_id);
    let left = &edges[..index];
    let right = &edges[index + 1..];

    let (from, to) = resolve_endpoints(graph, walk.start(), left, removed, right)?;
    let mut bridge = PathFinder::new(graph).shortest_path(from, to)?;

    if !left.contains(&removed_id) && !right.contains(&removed_id) && !bridge.contains(&removed_id)
    {
        bridge.push(removed_id);
        bridge.push(removed_id);
    }

    let mut spliced = Vec::with_capacity(left.len() + bridge.len() + right.len());
    spliced.extend_from_slice(left);
    spliced.extend(bridge);
    spliced.extend_from_slice(right);
    Ok(Walk::new(walk.start(), spliced))
}

/// Works out which endpoint of `removed` the walk enters from (`from`) and
/// which one it leaves through (`to`).
///
/// The left segment is tried first, then the right one. When the whole walk
/// consists of copies of the removed vertex pair, the orientation is counted
/// from the walk's start vertex instead.
fn resolve_endpoints(
    graph: &Graph,
    start: VertexId,
    left: &[EdgeId],
    removed: &Edge,
    right: &[EdgeId],
) -> Result<(VertexId, VertexId)> {
    if let Some(from) = boundary_vertex(graph, left.iter().rev(), removed)? {
        return Ok((from, removed.other_endpoint(from)?));
    }
    if let Some(to) = boundary_vertex(graph, right.iter(), removed)? {
        return Ok((removed.other_endpoint(to)?, to));
    }

    if !removed.is_incident(start) {
        return Err(PostmanError::AmbiguousSplice(removed.id()));
    }
    let from = if left.len() % 2 == 0 {
        start
    } else {
        removed.other_endpoint(start)?
    };
    Ok((from, removed.other_endpoint(from)?))
}

/// Scans `segment` outward from the removed edge and returns the endpoint
/// of `removed` that the segment attaches to.
///
/// Edges joining the same vertex pair as `removed` are back-and-forth
/// repeats; they are skipped and their count decides the parity. Returns
/// `None` if the segment holds nothing but such repeats.
fn boundary_vertex<'a, I>(graph: &Graph, segment: I, removed: &Edge) -> Result<Option<VertexId>>
where
    I: Iterator<Item = &'a EdgeId>,
{
    let mut repeats = 0usize;
    for &e in segment {
        let edge = graph.edge(e);
        if edge.same_pair(removed) {
            repeats += 1;
            continue;
        }
        let shared = edge
            .shared_vertex(removed)
            .ok_or(PostmanError::NoSharedVertex(e, removed.id()))?;
        return if repeats % 2 == 0 {
            Ok(Some(shared))
        } else {
            removed.other_endpoint(shared).map(Some)
        };
    }
    Ok(None)
}
