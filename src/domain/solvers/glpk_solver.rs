use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::convert::{to_borrowed_objective, to_glpk_polyhedron};
use crate::domain::solver::Solver;
use crate::domain::validate::{validate_objective, validate_polyhedron, SolveInputError};
use crate::models::{Objective, Solution, SolverDirection, SparseLEIntegerPolyhedron, Status};

use glpk_rust::solve_ilps as glpk_solve_ilps;

const NO_TERMINAL_OUTPUT: bool = false;

/// GLPK solver implementation
pub struct GlpkSolver;

impl GlpkSolver {
    pub fn new() -> Self {
        GlpkSolver
    }
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GlpkSolver {
    fn solve(
        &self,
        polyhedron: &SparseLEIntegerPolyhedron,
        objective: &Objective,
        direction: SolverDirection,
        time_limit: Option<Duration>,
    ) -> Result<Solution, SolveInputError> {
        validate_polyhedron(polyhedron)?;
        validate_objective(polyhedron, objective)?;

        let maximize = direction == SolverDirection::Maximize;
        let Some(limit) = time_limit else {
            return solve_blocking(polyhedron, objective, maximize);
        };

        // glpk_rust takes no time limit, so the solve runs on a worker and is
        // abandoned once the budget is spent.
        let (tx, rx) = mpsc::channel();
        let owned_polyhedron = polyhedron.clone();
        let owned_objective = objective.clone();
        thread::Builder::new()
            .name("glpk-solve".into())
            .spawn(move || {
                // The receiver is gone once the caller has timed out.
                let _ = tx.send(solve_blocking(&owned_polyhedron, &owned_objective, maximize));
            })
            .map_err(|e| SolveInputError::new(format!("Failed to start GLPK worker: {}", e)))?;

        match rx.recv_timeout(limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("GLPK did not finish within {:?}", limit);
                Ok(timed_out(limit))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(SolveInputError::new("GLPK worker stopped without a result"))
            }
        }
    }

    fn name(&self) -> &str {
        "GLPK"
    }
}

fn solve_blocking(
    polyhedron: &SparseLEIntegerPolyhedron,
    objective: &Objective,
    maximize: bool,
) -> Result<Solution, SolveInputError> {
    // Solver expects &mut
    let mut glpk_polyhedron = to_glpk_polyhedron(polyhedron);

    let mut lib_solutions = glpk_solve_ilps(
        &mut glpk_polyhedron,
        vec![to_borrowed_objective(objective)],
        maximize,
        NO_TERMINAL_OUTPUT,
    );

    if lib_solutions.is_empty() {
        return Err(SolveInputError::new("GLPK returned no solution"));
    }

    Ok(lib_solutions.swap_remove(0).into())
}

fn timed_out(limit: Duration) -> Solution {
    Solution {
        status: Status::Undefined,
        objective: 0,
        solution: HashMap::new(),
        error: Some(format!("time limit of {:?} reached", limit)),
    }
}
