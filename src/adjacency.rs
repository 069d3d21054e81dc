//! Tab-separated adjacency-matrix export of a graph.
//!
//! The first line lists the vertex ids, every following line starts with a
//! vertex id and holds the length of the edge to each column vertex, or `0`
//! where there is none. Every cell is followed by a tab. Vertices are
//! ordered by id.

use std::fs;
use std::io;
use std::path::Path;

use crate::graph::{Graph, VertexId};

/// Renders `graph` as an adjacency matrix.
///
/// Where parallel edges join a pair, the one added first is shown.
pub fn adjacency_matrix(graph: &Graph) -> String {
    let mut ids: Vec<VertexId> = graph.vertices().iter().map(|v| v.id()).collect();
    ids.sort();

    let mut out = String::from("\t");
    for id in &ids {
        out.push_str(&format!("{id}\t"));
    }
    out.push('\n');

    for &row in &ids {
        out.push_str(&format!("{row}\t"));
        for &col in &ids {
            match length_between(graph, row, col) {
                Some(length) => out.push_str(&format!("{length}\t")),
                None => out.push_str("0\t"),
            }
        }
        out.push('\n');
    }
    out
}

/// Writes [`adjacency_matrix`] to `path`, replacing any existing file.
pub fn write_adjacency_matrix(graph: &Graph, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, adjacency_matrix(graph))
}

fn length_between(graph: &Graph, a: VertexId, b: VertexId) -> Option<f64> {
    if a == b {
        return None;
    }
    let edges = graph.incident_edges(a).ok()?;
    edges
        .iter()
        .map(|&e| graph.edge(e))
        .find(|edge| edge.is_incident(b))
        .map(|edge| edge.length())
}
