//! Random connected graph generation.
//!
//! Each unordered vertex pair receives an edge with probability `alpha`.
//! Disconnected draws are thrown away. Once more than ten draws have
//! failed at one density, the density is raised so small graphs do not loop
//! for long.

use rand::Rng;

use super::model::{Graph, VertexId};
use crate::error::{PostmanError, Result};

/// Upper bound (exclusive) for generated edge lengths. The lower bound is 1.
pub const MAX_COST: f64 = 100.0;

const INITIAL_ALPHA: f64 = 0.5;
const ALPHA_STEP: f64 = 0.05;
/// Failed draws tolerated at one density; the next failure raises it.
const ATTEMPTS_PER_STEP: usize = 10;

/// Edge probability used for the zero-based `attempt`: `ATTEMPTS_PER_STEP + 1`
/// draws per density level.
fn alpha_for_attempt(attempt: usize) -> f64 {
    let level = attempt / (ATTEMPTS_PER_STEP + 1);
    INITIAL_ALPHA + ALPHA_STEP * level as f64
}

/// Builds a random connected graph with vertices `0..vertex_count`.
///
/// Edge lengths are uniform in `[1, MAX_COST)`. A single vertex yields a
/// graph without edges.
pub fn generate_connected<R: Rng>(vertex_count: usize, rng: &mut R) -> Result<Graph> {
    if vertex_count == 0 {
        return Err(PostmanError::InvalidConfig(
            "vertex_count must be at least 1".into(),
        ));
    }

    let mut attempt = 0usize;
    loop {
        let alpha = alpha_for_attempt(attempt);
        let graph = random_graph(vertex_count, alpha, rng)?;
        if graph.is_connected() {
            tracing::debug!(
                vertices = vertex_count,
                edges = graph.edge_count(),
                alpha,
                attempts = attempt + 1,
                "generated connected graph"
            );
            return Ok(graph);
        }
        attempt += 1;
    }
}

fn random_graph<R: Rng>(vertex_count: usize, alpha: f64, rng: &mut R) -> Result<Graph> {
    let mut graph = Graph::new();
    for i in 0..vertex_count {
        graph.add_vertex(i)?;
    }
    for i in 0..vertex_count {
        for j in (i + 1)..vertex_count {
            if rng.random::<f64>() <= alpha {
                let length = rng.random_range(1.0..MAX_COST);
                graph.add_edge(length, VertexId(i), VertexId(j))?;
            }
        }
    }
    Ok(graph)
}
