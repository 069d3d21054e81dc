//! Graph model and path searches.
//!
//! - [`Graph`] owns vertices and edges; edges refer to vertices by
//!   [`VertexId`], walks refer to edges by [`EdgeId`]. Identity is always
//!   by id, never by value.
//! - [`PathFinder`] offers fewest-hop (BFS) and shortest-length (Dijkstra)
//!   searches.
//! - [`generate_connected`] produces random connected test instances.

mod generator;
mod model;
mod path;

pub use generator::{generate_connected, MAX_COST};
pub use model::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use path::{path_length, PathFinder};
