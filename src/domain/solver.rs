use std::time::Duration;

use crate::domain::validate::SolveInputError;
use crate::models::{Objective, Solution, SolverDirection, SparseLEIntegerPolyhedron};

/// Common interface for ILP solvers
pub trait Solver: Send + Sync {
    /// Solve a single integer program
    ///
    /// # Arguments
    /// * `polyhedron` - The constraint polyhedron (Ax <= b with variable bounds)
    /// * `objective` - Coefficients keyed by variable id
    /// * `direction` - Maximize or Minimize
    /// * `time_limit` - Wall-clock budget for this call, where the backend supports one
    ///
    /// # Returns
    /// The best assignment found together with its status. A non-solution
    /// status is returned as `Ok`; only a rejected model is an `Err`.
    fn solve(
        &self,
        polyhedron: &SparseLEIntegerPolyhedron,
        objective: &Objective,
        direction: SolverDirection,
        time_limit: Option<Duration>,
    ) -> Result<Solution, SolveInputError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
