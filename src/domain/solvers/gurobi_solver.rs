use std::collections::HashMap;
use std::time::Duration;

use crate::domain::solver::Solver;
use crate::domain::validate::{validate_objective, validate_polyhedron, SolveInputError};
use crate::models::{Objective, Solution, SolverDirection, SparseLEIntegerPolyhedron, Status};

use grb::prelude::*;

/// Gurobi solver implementation
pub struct GurobiSolver;

impl GurobiSolver {
    pub fn new() -> Self {
        GurobiSolver
    }

    fn convert_status(status: grb::Status) -> Status {
        match status {
            grb::Status::Optimal => Status::Optimal,
            grb::Status::TimeLimit | grb::Status::SubOptimal => Status::Feasible,
            grb::Status::Infeasible => Status::Infeasible,
            grb::Status::InfOrUnbd | grb::Status::Unbounded => Status::Unbounded,
            _ => Status::Undefined,
        }
    }
}

impl Default for GurobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn gurobi_error(action: &str) -> impl Fn(grb::Error) -> SolveInputError + '_ {
    move |e| SolveInputError::new(format!("Failed to {}: {}", action, e))
}

impl Solver for GurobiSolver {
    fn solve(
        &self,
        polyhedron: &SparseLEIntegerPolyhedron,
        objective: &Objective,
        direction: SolverDirection,
        time_limit: Option<Duration>,
    ) -> std::result::Result<Solution, SolveInputError> {
        validate_polyhedron(polyhedron)?;
        validate_objective(polyhedron, objective)?;

        let sense = match direction {
            SolverDirection::Maximize => ModelSense::Maximize,
            SolverDirection::Minimize => ModelSense::Minimize,
        };

        let mut env = Env::new("").map_err(gurobi_error("create Gurobi environment"))?;
        env.set(param::OutputFlag, 0)
            .map_err(gurobi_error("set Gurobi output flag"))?;
        if let Some(limit) = time_limit {
            env.set(param::TimeLimit, limit.as_secs_f64())
                .map_err(gurobi_error("set Gurobi time limit"))?;
        }

        let mut model = Model::with_env("slideshow", &env).map_err(gurobi_error("create Gurobi model"))?;

        let mut vars: Vec<Var> = Vec::with_capacity(polyhedron.variables.len());
        for var in polyhedron.variables.iter() {
            let (lower, upper) = var.bound;
            let gurobi_var = if lower == 0 && upper == 1 {
                add_binvar!(model, name: &var.id).map_err(gurobi_error("add binary variable"))?
            } else {
                add_intvar!(model, name: &var.id, bounds: lower as f64..upper as f64)
                    .map_err(gurobi_error("add integer variable"))?
            };
            vars.push(gurobi_var);
        }

        // Row-major view of the coordinate matrix
        let mut row_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); polyhedron.a.shape.nrows];
        for i in 0..polyhedron.a.nnz() {
            let row = polyhedron.a.rows[i] as usize;
            let col = polyhedron.a.cols[i] as usize;
            row_data[row].push((col, polyhedron.a.vals[i] as f64));
        }

        for (row_idx, entries) in row_data.iter().enumerate() {
            if entries.is_empty() {
                continue;
            }
            let rhs = polyhedron.b[row_idx] as f64;
            let expr = entries
                .iter()
                .fold(Expr::Constant(0.0), |acc, &(col_idx, coeff)| acc + coeff * vars[col_idx]);

            model
                .add_constr(&format!("c{}", row_idx), c!(expr <= rhs))
                .map_err(gurobi_error("add constraint"))?;
        }

        let obj_expr = polyhedron
            .variables
            .iter()
            .zip(vars.iter())
            .fold(Expr::Constant(0.0), |acc, (var, &gurobi_var)| {
                match objective.get(&var.id) {
                    Some(&coeff) if coeff != 0.0 => acc + coeff * gurobi_var,
                    _ => acc,
                }
            });

        model
            .set_objective(obj_expr, sense)
            .map_err(gurobi_error("set objective"))?;
        model.optimize().map_err(gurobi_error("optimize"))?;

        let status = Self::convert_status(model.status().map_err(gurobi_error("get model status"))?);

        let mut solution: HashMap<String, i64> = HashMap::with_capacity(vars.len());
        for (var, gurobi_var) in polyhedron.variables.iter().zip(vars.iter()) {
            // No incumbent means no X attribute; report zero and let the caller reject it.
            let value = model.get_obj_attr(attr::X, gurobi_var).unwrap_or(0.0);
            solution.insert(var.id.clone(), value.round() as i64);
        }

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
        "Gurobi"
    }
}
