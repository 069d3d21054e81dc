//! Core trait for Simulated Annealing.

use rand::Rng;

use crate::error::Result;

/// Defines a Simulated Annealing problem.
///
/// The user implements initial-solution construction, neighbor generation
/// and cost evaluation. The SA framework handles temperature management,
/// the acceptance criterion and cooling.
///
/// Construction and neighbor generation are fallible: a broken invariant
/// inside the problem aborts the run with an error instead of panicking.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates the initial solution (the first Markov-chain state).
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution>;

    /// Computes the cost of a solution. Lower is better.
    ///
    /// Must be deterministic: equal solutions give bit-identical costs.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    fn neighbor<R: Rng>(
        &self,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Result<Self::Solution>;
}
