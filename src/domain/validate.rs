use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Objective, SparseLEIntegerPolyhedron};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{details}")]
pub struct SolveInputError {
    pub details: String,
}

impl SolveInputError {
    pub fn new(details: impl Into<String>) -> Self {
        SolveInputError {
            details: details.into(),
        }
    }
}

/// Checks that the sparse matrix, right-hand side and variable list agree.
pub fn validate_polyhedron(polyhedron: &SparseLEIntegerPolyhedron) -> Result<(), SolveInputError> {
    let a = &polyhedron.a;

    if a.rows.len() != a.cols.len() || a.rows.len() != a.vals.len() {
        return Err(SolveInputError::new(format!(
            "Matrix coordinate arrays differ in length (rows {}, cols {}, vals {})",
            a.rows.len(),
            a.cols.len(),
            a.vals.len(),
        )));
    }

    if polyhedron.b.len() != a.shape.nrows {
        return Err(SolveInputError::new(format!(
            "Right-hand side has {} entries but matrix has {} rows",
            polyhedron.b.len(),
            a.shape.nrows,
        )));
    }

    if polyhedron.variables.len() != a.shape.ncols {
        return Err(SolveInputError::new(format!(
            "Matrix has {} columns but {} variables were declared",
            a.shape.ncols,
            polyhedron.variables.len(),
        )));
    }

    for (&row, &col) in a.rows.iter().zip(a.cols.iter()) {
        if row < 0 || row as usize >= a.shape.nrows || col < 0 || col as usize >= a.shape.ncols {
            return Err(SolveInputError::new(format!(
                "Matrix entry ({}, {}) is outside shape {}x{}",
                row, col, a.shape.nrows, a.shape.ncols,
            )));
        }
    }

    Ok(())
}

pub fn validate_objective(
    polyhedron: &SparseLEIntegerPolyhedron,
    objective: &Objective,
) -> Result<(), SolveInputError> {
    let variable_ids: HashSet<&str> = polyhedron
        .variables
        .iter()
        .map(|v| v.id.as_str())
        .collect();

    for objective_variable in objective.keys() {
        if !variable_ids.contains(objective_variable.as_str()) {
            return Err(SolveInputError::new(format!(
                "Objective contains missing variable {}",
                objective_variable,
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variable;
    use std::collections::HashMap;

    fn two_variable_polyhedron() -> SparseLEIntegerPolyhedron {
        let mut polyhedron = SparseLEIntegerPolyhedron::new(vec![
            Variable::binary("x1"),
            Variable::binary("x2"),
        ]);
        polyhedron.push_row(&[(0, 1), (1, 1)], 1);
        polyhedron
    }

    #[test]
    fn test_validate_objective_given_valid_objective_should_return_ok() {
        let objective = HashMap::from([("x1".to_string(), 1.0), ("x2".to_string(), 2.0)]);
        assert!(validate_objective(&two_variable_polyhedron(), &objective).is_ok());
    }

    #[test]
    fn test_validate_objective_given_missing_variable_should_return_error() {
        let objective = HashMap::from([("x1".to_string(), 1.0), ("missing".to_string(), 2.0)]);
        let err = validate_objective(&two_variable_polyhedron(), &objective).unwrap_err();
        assert!(err.details.contains("missing"));
    }

    #[test]
    fn test_validate_polyhedron_given_consistent_shape_should_return_ok() {
        assert!(validate_polyhedron(&two_variable_polyhedron()).is_ok());
    }

    #[test]
    fn test_validate_polyhedron_given_short_rhs_should_return_error() {
        let mut polyhedron = two_variable_polyhedron();
        polyhedron.b.clear();
        assert!(validate_polyhedron(&polyhedron).is_err());
    }

    #[test]
    fn test_validate_polyhedron_given_out_of_shape_entry_should_return_error() {
        let mut polyhedron = two_variable_polyhedron();
        polyhedron.a.cols[1] = 5;
        assert!(validate_polyhedron(&polyhedron).is_err());
    }
}
