//! The postman problem plugged into the annealing engine.

use rand::Rng;

use super::construct::find_first_solution;
use super::neighbour::generate_neighbour;
use super::walk::Walk;
use crate::error::{PostmanError, Result};
use crate::graph::{Graph, VertexId};
use crate::sa::{CostSink, NullSink, SaConfig, SaProblem, SaResult, SaRunner};

/// Chinese Postman instance: a connected graph and the vertex every walk
/// starts and ends at.
#[derive(Debug, Clone, Copy)]
pub struct PostmanProblem<'g> {
    graph: &'g Graph,
    start: VertexId,
}

impl<'g> PostmanProblem<'g> {
    /// Checks the run preconditions: `start` is in the graph and the graph
    /// is connected.
    pub fn new(graph: &'g Graph, start: VertexId) -> Result<Self> {
        if !graph.contains_vertex(start) {
            return Err(PostmanError::StartVertexNotInGraph(start));
        }
        if !graph.is_connected() {
            return Err(PostmanError::Disconnected);
        }
        Ok(Self { graph, start })
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn start(&self) -> VertexId {
        self.start
    }
}

impl SaProblem for PostmanProblem<'_> {
    type Solution = Walk;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Walk> {
        find_first_solution(self.graph, self.start, rng)
    }

    fn cost(&self, walk: &Walk) -> f64 {
        walk.cost(self.graph)
    }

    fn neighbor<R: Rng>(&self, walk: &Walk, rng: &mut R) -> Result<Walk> {
        generate_neighbour(self.graph, walk, rng)
    }
}

/// Searches for a short closed walk from `start` covering every edge.
///
/// Preconditions are checked before any search work. The run is a pure
/// function of the graph, the start vertex and `config` (seed included).
pub fn find_solution(graph: &Graph, start: VertexId, config: &SaConfig) -> Result<SaResult<Walk>> {
    find_solution_with_sink(graph, start, config, &mut NullSink)
}

/// [`find_solution`] that also streams every emitted cost into `sink`.
pub fn find_solution_with_sink<S>(
    graph: &Graph,
    start: VertexId,
    config: &SaConfig,
    sink: &mut S,
) -> Result<SaResult<Walk>>
where
    S: CostSink + ?Sized,
{
    let problem = PostmanProblem::new(graph, start)?;
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        start = start.0,
        initial_temperature = config.initial_temperature,
        final_temperature = config.final_temperature,
        inner_loop_count = config.inner_loop_count,
        cooling_alpha = config.cooling_alpha,
        "starting postman annealing run"
    );

    let result = SaRunner::run_with_sink(&problem, config, sink)?;

    tracing::info!(
        best_cost = result.best_cost,
        walk_len = result.best.len(),
        iterations = result.iterations,
        accepted = result.accepted_moves,
        "postman annealing run finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate_connected;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(seed: u64) -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(100.0)
            .with_final_temperature(1.0)
            .with_cooling_alpha(0.92)
            .with_inner_loop_count(5)
            .with_seed(seed)
    }

    #[test]
    fn test_start_vertex_not_in_graph() {
        let mut g = Graph::new();
        let a = g.add_vertex(0).unwrap();
        let b = g.add_vertex(1).unwrap();
        g.add_edge(1.0, a, b).unwrap();

        let mut costs: Vec<f64> = Vec::new();
        let err = find_solution_with_sink(&g, VertexId(42), &config(1), &mut costs).unwrap_err();
        assert_eq!(err, PostmanError::StartVertexNotInGraph(VertexId(42)));
        assert!(err.is_precondition());
        assert!(costs.is_empty());
    }

    #[test]
    fn test_disconnected_graph_rejected() {
        let mut g = Graph::new();
        let a = g.add_vertex(0).unwrap();
        let b = g.add_vertex(1).unwrap();
        g.add_vertex(2).unwrap();
        g.add_edge(1.0, a, b).unwrap();
        assert_eq!(
            find_solution(&g, a, &config(1)).unwrap_err(),
            PostmanError::Disconnected
        );
    }

    #[test]
    fn test_triangle_solution() {
        let mut g = Graph::new();
        let v: Vec<VertexId> = (0..3).map(|i| g.add_vertex(i).unwrap()).collect();
        g.add_edge(5.0, v[0], v[1]).unwrap();
        g.add_edge(3.0, v[1], v[2]).unwrap();
        g.add_edge(4.0, v[2], v[0]).unwrap();

        let result = find_solution(&g, v[0], &config(3)).unwrap();
        assert!((result.best_cost - 12.0).abs() < 1e-12);
        assert!(result.best.validate(&g).is_ok());
    }

    #[test]
    fn test_single_edge_solution() {
        let mut g = Graph::new();
        let a = g.add_vertex(0).unwrap();
        let b = g.add_vertex(1).unwrap();
        g.add_edge(7.0, a, b).unwrap();

        let result = find_solution(&g, a, &config(3)).unwrap();
        assert!((result.best_cost - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_never_worse_than_initial() {
        let mut rng = StdRng::seed_from_u64(99);
        let g = generate_connected(10, &mut rng).unwrap();
        let start = VertexId(0);

        let cfg = config(5);
        let problem = PostmanProblem::new(&g, start).unwrap();
        let initial = problem
            .initial_solution(&mut StdRng::seed_from_u64(5))
            .unwrap();

        let result = find_solution(&g, start, &cfg).unwrap();
        assert!(result.best_cost <= initial.cost(&g));
        assert!(result.best_cost >= g.total_length() - 1e-9);
        assert!(result.best.validate(&g).is_ok());
        assert!((result.best.cost(&g) - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let mut rng = StdRng::seed_from_u64(4);
        let g = generate_connected(8, &mut rng).unwrap();

        let mut first: Vec<f64> = Vec::new();
        let mut second: Vec<f64> = Vec::new();
        let a = find_solution_with_sink(&g, VertexId(0), &config(17), &mut first).unwrap();
        let b = find_solution_with_sink(&g, VertexId(0), &config(17), &mut second).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.best_cost.to_bits(), b.best_cost.to_bits());
        assert_eq!(first.len(), second.len());
        assert!(first.iter().zip(&second).all(|(x, y)| x.to_bits() == y.to_bits()));
        assert_eq!(first.len(), (5 + 1) * config(17).outer_iterations());
    }
}
