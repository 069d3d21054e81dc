//! Chinese Postman Problem solved by simulated annealing.
//!
//! The search space is the set of closed walks from a fixed start vertex
//! that traverse every edge at least once. The chain starts from a
//! randomised covering walk ([`find_first_solution`]) and moves by removing
//! one edge occurrence and reconnecting the gap with a shortest path
//! ([`generate_neighbour`]). Both operations keep coverage and closedness
//! intact, so every state the annealer visits is a feasible tour.
//!
//! # Example
//!
//! ```
//! use u_postman::graph::Graph;
//! use u_postman::postman::find_solution;
//! use u_postman::sa::SaConfig;
//!
//! let mut graph = Graph::new();
//! let a = graph.add_vertex(0).unwrap();
//! let b = graph.add_vertex(1).unwrap();
//! let c = graph.add_vertex(2).unwrap();
//! graph.add_edge(5.0, a, b).unwrap();
//! graph.add_edge(3.0, b, c).unwrap();
//! graph.add_edge(4.0, c, a).unwrap();
//!
//! let config = SaConfig::default().with_seed(7);
//! let result = find_solution(&graph, a, &config).unwrap();
//! assert_eq!(result.best_cost, 12.0);
//! ```

mod construct;
mod neighbour;
mod solver;
mod walk;

pub use construct::find_first_solution;
pub use neighbour::{generate_neighbour, splice_at};
pub use solver::{find_solution, find_solution_with_sink, PostmanProblem};
pub use walk::Walk;
