use std::collections::HashMap;
use std::time::Duration;

use crate::domain::solver::Solver;
use crate::domain::validate::{validate_objective, validate_polyhedron, SolveInputError};
use crate::models::{Objective, Solution, SolverDirection, SparseLEIntegerPolyhedron, Status};

use ::highs::{ColProblem, HighsModelStatus, Sense};

/// HiGHS solver implementation
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    fn convert_status(model_status: HighsModelStatus) -> Status {
        match model_status {
            HighsModelStatus::Optimal => Status::Optimal,
            // Incumbent may be usable; the caller checks the assignment.
            HighsModelStatus::ReachedTimeLimit => Status::Feasible,
            HighsModelStatus::Infeasible => Status::Infeasible,
            HighsModelStatus::UnboundedOrInfeasible => Status::Unbounded,
            HighsModelStatus::Unbounded => Status::Unbounded,
            _ => Status::Undefined,
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn solve(
        &self,
        polyhedron: &SparseLEIntegerPolyhedron,
        objective: &Objective,
        direction: SolverDirection,
        time_limit: Option<Duration>,
    ) -> Result<Solution, SolveInputError> {
        validate_polyhedron(polyhedron)?;
        validate_objective(polyhedron, objective)?;

        let sense = match direction {
            SolverDirection::Maximize => Sense::Maximise,
            SolverDirection::Minimize => Sense::Minimise,
        };

        let mut problem = ColProblem::new();

        let n_rows = polyhedron.a.shape.nrows;
        let rows: Vec<_> = polyhedron
            .b
            .iter()
            .map(|&rhs| problem.add_row(..=rhs as f64))
            .collect();

        // Column-major view of the coordinate matrix
        let mut col_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); polyhedron.a.shape.ncols];
        for i in 0..polyhedron.a.nnz() {
            let row = polyhedron.a.rows[i] as usize;
            let col = polyhedron.a.cols[i] as usize;
            if row < n_rows {
                col_data[col].push((row, polyhedron.a.vals[i] as f64));
            }
        }

        for (var, entries) in polyhedron.variables.iter().zip(col_data.iter()) {
            let obj_coeff = objective.get(&var.id).copied().unwrap_or(0.0);
            let (lower, upper) = var.bound;
            let row_factors: Vec<_> = entries
                .iter()
                .map(|(row_idx, val)| (rows[*row_idx], *val))
                .collect();

            problem.add_integer_column(obj_coeff, lower as f64..=upper as f64, &row_factors);
        }

        let mut model = problem.optimise(sense);
        model.set_option("output_flag", false);
        if let Some(limit) = time_limit {
            model.set_option("time_limit", limit.as_secs_f64());
        }
        let solved = model.solve();

        let status = Self::convert_status(solved.status());
        let values = solved.get_solution();

        let solution: HashMap<String, i64> = polyhedron
            .variables
            .iter()
            .enumerate()
            .map(|(idx, var)| {
                let value = values.columns().get(idx).copied().unwrap_or(0.0);
                (var.id.clone(), value.round() as i64)
            })
            .collect();

        let objective_value: f64 = solution
            .iter()
            .filter_map(|(id, &val)| objective.get(id).map(|coeff| coeff * val as f64))
            .sum();

        Ok(Solution {
            status,
            objective: objective_value.round() as i32,
            solution,
            error: None,
        })
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
