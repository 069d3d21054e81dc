//! SA execution loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SaConfig;
use super::sink::{CostSink, NullSink};
use super::types::SaProblem;
use crate::error::{PostmanError, Result};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of temperature levels visited.
    pub outer_iterations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Best cost at the end of each temperature level.
    pub cost_history: Vec<f64>,
}

/// Acceptance rule.
///
/// A strictly cheaper candidate is always taken. Otherwise `draw` is called
/// once for a uniform value in `[0, 1)` and the candidate is taken when
/// that value is at most `exp(-|candidate - current| / temperature)`.
pub fn accepts<F>(current: f64, candidate: f64, temperature: f64, draw: F) -> bool
where
    F: FnOnce() -> f64,
{
    candidate < current || draw() <= (-(candidate - current).abs() / temperature).exp()
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization, discarding the per-iteration cost stream.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        Self::run_with_sink(problem, config, &mut NullSink)
    }

    /// Runs SA and feeds every emitted cost to `sink`.
    ///
    /// Per temperature level the sink receives `inner_loop_count` neighbour
    /// costs followed by the current cost. Exactly
    /// [`SaConfig::outer_iterations`] levels are visited, so the stream length
    /// is known up front and does not depend on rounding in repeated cooling.
    pub fn run_with_sink<P, S>(
        problem: &P,
        config: &SaConfig,
        sink: &mut S,
    ) -> Result<SaResult<P::Solution>>
    where
        P: SaProblem,
        S: CostSink + ?Sized,
    {
        config.validate().map_err(PostmanError::InvalidConfig)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut current = problem.initial_solution(&mut rng)?;
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        tracing::debug!(cost = current_cost, seed, "initial solution");

        let levels = config.outer_iterations().max(1);
        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut outer_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = Vec::with_capacity(levels);

        while outer_iterations < levels {
            for _ in 0..config.inner_loop_count {
                let neighbor = problem.neighbor(&current, &mut rng)?;
                let neighbor_cost = problem.cost(&neighbor);
                sink.record(neighbor_cost);
                tracing::trace!(cost = neighbor_cost, "generated neighbour");

                let improving = neighbor_cost < current_cost;
                if accepts(current_cost, neighbor_cost, temperature, || {
                    rng.random::<f64>()
                }) {
                    current = neighbor;
                    current_cost = neighbor_cost;
                    accepted_moves += 1;
                    if improving {
                        improving_moves += 1;
                    }
                }

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }

                total_iterations += 1;
            }

            sink.record(current_cost);
            cost_history.push(best_cost);
            tracing::debug!(temperature, current_cost, best_cost, "temperature level done");

            outer_iterations += 1;
            temperature = config.cool(temperature);
        }

        Ok(SaResult {
            best,
            best_cost,
            iterations: total_iterations,
            outer_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        })
    }
}
