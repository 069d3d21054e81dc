//! Error type shared by the graph model, path finder and solver.

use std::fmt;

use crate::graph::{EdgeId, VertexId};

/// Errors raised while building graphs or running the solver.
///
/// Every variant is fatal for the run that raised it. Graphs are never
/// mutated by a run, so a failed run leaves the shared graph intact.
#[derive(Debug, Clone, PartialEq)]
pub enum PostmanError {
    /// An edge length was zero, negative or not a number.
    NonPositiveLength(f64),
    /// A vertex with this id already exists in the graph.
    DuplicateVertex(VertexId),
    /// The vertex is not part of the graph.
    UnknownVertex(VertexId),
    /// Both endpoints of an edge are the same vertex.
    SelfLoop(VertexId),
    /// The vertex is neither endpoint of the edge.
    NotIncident { edge: EdgeId, vertex: VertexId },
    /// The solver was started from a vertex absent from the graph.
    StartVertexNotInGraph(VertexId),
    /// Some vertex cannot be reached from the others.
    Disconnected,
    /// A search could not reach its target.
    Unreachable { from: VertexId },
    /// More than one edge joins two vertices expected to be adjacent.
    AmbiguousEdge(VertexId, VertexId),
    /// No edge joins two vertices expected to be adjacent.
    MissingEdge(VertexId, VertexId),
    /// Two consecutive walk edges do not share an endpoint.
    NoSharedVertex(EdgeId, EdgeId),
    /// A walk ends somewhere other than where it started.
    OpenWalk { start: VertexId, end: VertexId },
    /// Neither side of a splice pins down the removed edge's orientation.
    AmbiguousSplice(EdgeId),
    /// A walk position past the end of the walk.
    IndexOutOfRange { index: usize, len: usize },
    /// Solver or generator parameters are out of range.
    InvalidConfig(String),
}

impl PostmanError {
    /// Returns `true` for faults detected before any search work begins.
    ///
    /// Everything else signals a broken invariant inside a run.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PostmanError::StartVertexNotInGraph(_)
                | PostmanError::Disconnected
                | PostmanError::InvalidConfig(_)
        )
    }
}

impl fmt::Display for PostmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostmanError::NonPositiveLength(len) => {
                write!(f, "edge length must be positive, got {len}")
            }
            PostmanError::DuplicateVertex(v) => write!(f, "vertex {v} already exists"),
            PostmanError::UnknownVertex(v) => write!(f, "vertex {v} is not in the graph"),
            PostmanError::SelfLoop(v) => write!(f, "self-loop on vertex {v} is not allowed"),
            PostmanError::NotIncident { edge, vertex } => {
                write!(f, "vertex {vertex} is not an endpoint of edge {edge}")
            }
            PostmanError::StartVertexNotInGraph(v) => {
                write!(f, "start vertex {v} is not in the graph")
            }
            PostmanError::Disconnected => write!(f, "graph is not connected"),
            PostmanError::Unreachable { from } => {
                write!(f, "search from vertex {from} did not reach its target")
            }
            PostmanError::AmbiguousEdge(a, b) => {
                write!(f, "multiple edges between vertices {a} and {b}")
            }
            PostmanError::MissingEdge(a, b) => write!(f, "no edge between vertices {a} and {b}"),
            PostmanError::NoSharedVertex(a, b) => {
                write!(f, "edges {a} and {b} have no common vertex")
            }
            PostmanError::OpenWalk { start, end } => {
                write!(f, "walk starts at vertex {start} but ends at vertex {end}")
            }
            PostmanError::AmbiguousSplice(e) => {
                write!(f, "cannot resolve splice endpoints around edge {e}")
            }
            PostmanError::IndexOutOfRange { index, len } => {
                write!(f, "walk position {index} is out of range for a walk of {len} edges")
            }
            PostmanError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for PostmanError {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PostmanError>;
