//! Parameter sweep over graph sizes, temperatures, inner-loop counts and
//! repetitions.
//!
//! [`run_sweep`] runs every grid point against one read-only graph with its
//! own seed and its own cost buffer. [`run_size_sweep`] first generates one
//! random graph per entry of [`SweepConfig::graph_sizes`] and sweeps each of
//! them from its first vertex. With the `parallel` feature the runs are
//! spread over a rayon thread pool; results come back in grid order either
//! way.

use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::adjacency::write_adjacency_matrix;
use crate::costlog::FileCostLog;
use crate::error::{PostmanError, Result};
use crate::graph::{generate_connected, Graph, VertexId};
use crate::postman::{find_solution_with_sink, Walk};
use crate::sa::{CostSink, SaConfig};

/// Grid of solver parameters.
///
/// # Examples
///
/// ```
/// use u_postman::sweep::SweepConfig;
///
/// let config = SweepConfig::default()
///     .with_temperatures(vec![50.0, 100.0])
///     .with_inner_loops(vec![1, 5])
///     .with_repetitions(2);
/// assert_eq!(config.run_count(), 8);
/// assert_eq!(config.total_run_count(), 5 * 8);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Vertex counts of the graphs generated by [`run_size_sweep`].
    pub graph_sizes: Vec<usize>,
    /// Seed of the generator shared by all graph sizes.
    pub graph_seed: u64,
    /// Initial temperatures to try.
    pub temperatures: Vec<f64>,
    /// Inner-loop counts to try.
    pub inner_loops: Vec<u32>,
    /// Independent runs per parameter combination.
    pub repetitions: usize,
    /// Final temperature shared by every run.
    pub final_temperature: f64,
    /// Cooling factor shared by every run.
    pub cooling_alpha: f64,
    /// Seed of the first run; run `i` of the grid uses `base_seed + i`.
    pub base_seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            graph_sizes: vec![5, 10, 15, 20, 25],
            graph_seed: 0,
            temperatures: vec![
                50.0, 100.0, 150.0, 200.0, 300.0, 400.0, 500.0, 750.0, 1000.0, 1500.0, 2000.0,
            ],
            inner_loops: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20],
            repetitions: 10,
            final_temperature: 1.0,
            cooling_alpha: 0.92,
            base_seed: 0,
        }
    }
}

impl SweepConfig {
    pub fn with_graph_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.graph_sizes = sizes;
        self
    }

    pub fn with_graph_seed(mut self, seed: u64) -> Self {
        self.graph_seed = seed;
        self
    }

    pub fn with_temperatures(mut self, temperatures: Vec<f64>) -> Self {
        self.temperatures = temperatures;
        self
    }

    pub fn with_inner_loops(mut self, inner_loops: Vec<u32>) -> Self {
        self.inner_loops = inner_loops;
        self
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_cooling_alpha(mut self, alpha: f64) -> Self {
        self.cooling_alpha = alpha;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Number of solver runs per graph.
    pub fn run_count(&self) -> usize {
        self.temperatures.len() * self.inner_loops.len() * self.repetitions
    }

    /// Number of solver runs over all graph sizes.
    pub fn total_run_count(&self) -> usize {
        self.graph_sizes.len() * self.run_count()
    }

    fn check_grid(&self) -> Result<()> {
        if self.run_count() == 0 {
            return Err(PostmanError::InvalidConfig(
                "sweep grid must contain at least one run".into(),
            ));
        }
        Ok(())
    }

    /// Expands the grid into one [`SweepPoint`] per run, temperature-major.
    pub fn points(&self) -> Vec<SweepPoint> {
        let mut points = Vec::with_capacity(self.run_count());
        for &initial_temperature in &self.temperatures {
            for &inner_loop_count in &self.inner_loops {
                for repetition in 0..self.repetitions {
                    let seed = self.base_seed.wrapping_add(points.len() as u64);
                    points.push(SweepPoint {
                        repetition,
                        config: SaConfig::default()
                            .with_initial_temperature(initial_temperature)
                            .with_final_temperature(self.final_temperature)
                            .with_cooling_alpha(self.cooling_alpha)
                            .with_inner_loop_count(inner_loop_count)
                            .with_seed(seed),
                    });
                }
            }
        }
        points
    }
}

/// A single grid point.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub repetition: usize,
    pub config: SaConfig,
}

impl SweepPoint {
    /// Label identifying the run, e.g. `size10_temp100_inner5_iter3`.
    pub fn label(&self, graph_size: usize) -> String {
        format!(
            "size{}_temp{}_inner{}_iter{}",
            graph_size, self.config.initial_temperature, self.config.inner_loop_count, self.repetition
        )
    }
}

/// Outcome of one run of the sweep.
#[derive(Debug, Clone)]
pub struct SweepRun {
    pub label: String,
    pub point: SweepPoint,
    pub best: Walk,
    pub best_cost: f64,
    /// Iteration-cost stream in emission order.
    pub costs: Vec<f64>,
}

/// All runs against one generated graph.
#[derive(Debug, Clone)]
pub struct GraphSweep {
    pub size: usize,
    pub graph: Graph,
    pub runs: Vec<SweepRun>,
}

impl GraphSweep {
    /// Writes `graph{size}.txt` (the adjacency matrix) and one
    /// `text_{label}.txt` cost log per run into `dir`.
    pub fn write_files(&self, dir: impl AsRef<Path>) -> io::Result<()> {
        let dir = dir.as_ref();
        write_adjacency_matrix(&self.graph, dir.join(format!("graph{}.txt", self.size)))?;
        for run in &self.runs {
            let mut log = FileCostLog::create(dir.join(format!("text_{}.txt", run.label)))?;
            for &cost in &run.costs {
                log.record(cost);
            }
            log.finish(run.best_cost)?;
        }
        Ok(())
    }
}

/// Generates one connected graph per entry of `graph_sizes` and sweeps the
/// grid on each, starting from the graph's first vertex.
///
/// The graphs come from a single generator seeded with `graph_seed`, so the
/// same config always yields the same graphs.
pub fn run_size_sweep(config: &SweepConfig) -> Result<Vec<GraphSweep>> {
    if config.graph_sizes.is_empty() {
        return Err(PostmanError::InvalidConfig(
            "sweep needs at least one graph size".into(),
        ));
    }
    config.check_grid()?;

    let mut rng = StdRng::seed_from_u64(config.graph_seed);
    let mut sweeps = Vec::with_capacity(config.graph_sizes.len());
    for &size in &config.graph_sizes {
        let graph = generate_connected(size, &mut rng)?;
        let start = graph
            .vertices()
            .first()
            .map(|v| v.id())
            .ok_or_else(|| PostmanError::InvalidConfig("graph has no vertices".into()))?;
        tracing::info!(size, edges = graph.edge_count(), "sweeping generated graph");
        let runs = run_sweep(&graph, start, config)?;
        sweeps.push(GraphSweep { size, graph, runs });
    }
    Ok(sweeps)
}

/// Runs the whole grid against `graph`.
///
/// The first failing run aborts the sweep with its error. The grid itself
/// is validated up front.
pub fn run_sweep(graph: &Graph, start: VertexId, config: &SweepConfig) -> Result<Vec<SweepRun>> {
    config.check_grid()?;
    let points = config.points();
    tracing::info!(runs = points.len(), "starting parameter sweep");

    #[cfg(feature = "parallel")]
    let points = points.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let points = points.into_iter();

    points
        .map(|point| run_point(graph, start, point))
        .collect()
}

fn run_point(graph: &Graph, start: VertexId, point: SweepPoint) -> Result<SweepRun> {
    let mut costs = Vec::new();
    let result = find_solution_with_sink(graph, start, &point.config, &mut costs)?;
    let label = point.label(graph.vertex_count());
    tracing::debug!(%label, best_cost = result.best_cost, "sweep run done");
    Ok(SweepRun {
        label,
        point,
        best: result.best,
        best_cost: result.best_cost,
        costs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RankedCosts;
    use crate::graph::generate_connected;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_sweep() -> SweepConfig {
        SweepConfig::default()
            .with_temperatures(vec![20.0, 40.0])
            .with_inner_loops(vec![1, 3])
            .with_repetitions(2)
            .with_base_seed(100)
    }

    #[test]
    fn test_points_cover_grid() {
        let config = small_sweep();
        let points = config.points();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0].config.seed, Some(100));
        assert_eq!(points[7].config.seed, Some(107));
        assert_eq!(points[0].label(5), "size5_temp20_inner1_iter0");
        assert_eq!(points[3].label(5), "size5_temp20_inner3_iter1");
    }

    #[test]
    fn test_default_grid_size() {
        let config = SweepConfig::default();
        assert_eq!(config.run_count(), 11 * 12 * 10);
        assert_eq!(config.graph_sizes, vec![5, 10, 15, 20, 25]);
        assert_eq!(config.total_run_count(), 5 * 11 * 12 * 10);
    }

    #[test]
    fn test_size_sweep_generates_one_graph_per_size() {
        let config = small_sweep().with_graph_sizes(vec![3, 5]).with_graph_seed(12);
        let sweeps = run_size_sweep(&config).unwrap();

        assert_eq!(sweeps.iter().map(|s| s.size).collect::<Vec<_>>(), vec![3, 5]);
        for sweep in &sweeps {
            assert_eq!(sweep.graph.vertex_count(), sweep.size);
            assert!(sweep.graph.is_connected());
            assert_eq!(sweep.runs.len(), config.run_count());
            assert!(sweep.runs[0].label.starts_with(&format!("size{}_", sweep.size)));
            for run in &sweep.runs {
                assert!(run.best.validate(&sweep.graph).is_ok());
            }
        }

        let again = run_size_sweep(&config).unwrap();
        for (a, b) in sweeps.iter().zip(&again) {
            assert_eq!(a.graph.edge_count(), b.graph.edge_count());
            assert_eq!(a.runs[0].best_cost.to_bits(), b.runs[0].best_cost.to_bits());
        }
    }

    #[test]
    fn test_size_sweep_rejects_empty_sizes_and_zero_size() {
        let none = small_sweep().with_graph_sizes(Vec::new());
        assert!(matches!(run_size_sweep(&none), Err(PostmanError::InvalidConfig(_))));
        let zero = small_sweep().with_graph_sizes(vec![0]);
        assert!(matches!(run_size_sweep(&zero), Err(PostmanError::InvalidConfig(_))));
    }

    #[test]
    fn test_size_sweep_writes_files() {
        use crate::analysis::parse_cost_log;
        use std::fs;

        let config = SweepConfig::default()
            .with_graph_sizes(vec![4])
            .with_temperatures(vec![10.0])
            .with_inner_loops(vec![2])
            .with_repetitions(1)
            .with_graph_seed(6);
        let sweeps = run_size_sweep(&config).unwrap();

        let dir = std::env::temp_dir().join(format!("u-postman-sweep-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        sweeps[0].write_files(&dir).unwrap();

        let matrix = fs::read_to_string(dir.join("graph4.txt")).unwrap();
        assert_eq!(matrix.lines().count(), 5);
        let run = &sweeps[0].runs[0];
        let log = fs::read_to_string(dir.join(format!("text_{}.txt", run.label))).unwrap();
        let parsed = parse_cost_log(&log).unwrap();
        assert_eq!(parsed.costs.len(), run.costs.len());
        assert_eq!(parsed.final_cost.map(f64::to_bits), Some(run.best_cost.to_bits()));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sweep_runs_every_point() {
        let mut rng = StdRng::seed_from_u64(8);
        let graph = generate_connected(6, &mut rng).unwrap();
        let config = small_sweep();

        let runs = run_sweep(&graph, VertexId(0), &config).unwrap();
        assert_eq!(runs.len(), config.run_count());
        for run in &runs {
            assert!(run.best.validate(&graph).is_ok());
            let expected = (run.point.config.inner_loop_count as usize + 1)
                * run.point.config.outer_iterations();
            assert_eq!(run.costs.len(), expected);
        }

        let finals: Vec<(String, f64)> =
            runs.iter().map(|r| (r.label.clone(), r.best_cost)).collect();
        let ranked = RankedCosts::from_runs(&finals);
        assert!(!ranked.best.is_empty());
        assert!(ranked.best[0].cost >= graph.total_length() - 1e-9);
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let mut rng = StdRng::seed_from_u64(2);
        let graph = generate_connected(5, &mut rng).unwrap();
        let config = small_sweep();
        let a = run_sweep(&graph, VertexId(0), &config).unwrap();
        let b = run_sweep(&graph, VertexId(0), &config).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.label, y.label);
            assert_eq!(x.best_cost.to_bits(), y.best_cost.to_bits());
        }
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut g = Graph::new();
        g.add_vertex(0).unwrap();
        let config = small_sweep().with_repetitions(0);
        assert!(matches!(
            run_sweep(&g, VertexId(0), &config),
            Err(PostmanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sweep_stops_on_bad_start() {
        let mut rng = StdRng::seed_from_u64(2);
        let graph = generate_connected(4, &mut rng).unwrap();
        let err = run_sweep(&graph, VertexId(99), &small_sweep()).unwrap_err();
        assert_eq!(err, PostmanError::StartVertexNotInGraph(VertexId(99)));
    }
}
