use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use glpk_rust::Bound;

// ---------- Integer program types: owned & serde-friendly ----------

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Variable {
    pub id: String,
    pub bound: Bound, // (i32, i32) from glpk_rust
}

impl Variable {
    pub fn binary(id: impl Into<String>) -> Self {
        Variable {
            id: id.into(),
            bound: (0, 1),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Shape {
    pub nrows: usize,
    pub ncols: usize,
}

/// Coordinate-format sparse matrix.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IntegerSparseMatrix {
    pub rows: Vec<i32>,
    pub cols: Vec<i32>,
    pub vals: Vec<i32>,
    pub shape: Shape,
}

impl IntegerSparseMatrix {
    pub fn empty(ncols: usize) -> Self {
        IntegerSparseMatrix {
            rows: Vec::new(),
            cols: Vec::new(),
            vals: Vec::new(),
            shape: Shape { nrows: 0, ncols },
        }
    }

    pub fn nnz(&self) -> usize {
        self.vals.len()
    }
}

/// Constraint set `A x <= b` over bounded integer variables.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SparseLEIntegerPolyhedron {
    #[serde(rename = "A")]
    pub a: IntegerSparseMatrix,
    pub b: Vec<i32>, // LE right-hand side
    pub variables: Vec<Variable>,
}

impl SparseLEIntegerPolyhedron {
    pub fn new(variables: Vec<Variable>) -> Self {
        SparseLEIntegerPolyhedron {
            a: IntegerSparseMatrix::empty(variables.len()),
            b: Vec::new(),
            variables,
        }
    }

    /// Appends the row `sum(coeff * x[col]) <= rhs`.
    pub fn push_row(&mut self, entries: &[(usize, i32)], rhs: i32) {
        let row = self.a.shape.nrows as i32;
        for &(col, val) in entries {
            self.a.rows.push(row);
            self.a.cols.push(col as i32);
            self.a.vals.push(val);
        }
        self.a.shape.nrows += 1;
        self.b.push(rhs);
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverDirection {
    Maximize,
    Minimize,
}

pub type Objective = HashMap<String, f64>;

/// Wire format accepted by GLPK solver services.
#[derive(Serialize, Deserialize, Debug)]
pub struct SolveRequest {
    pub polyhedron: SparseLEIntegerPolyhedron,
    pub objectives: Vec<Objective>,
    pub direction: SolverDirection,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Undefined = 1,
    Feasible = 2,
    Infeasible = 3,
    NoFeasible = 4,
    Optimal = 5,
    Unbounded = 6,
    SimplexFailed = 7,
    MIPFailed = 8,
    EmptySpace = 9,
}

impl Status {
    /// Whether the solver returned a usable assignment.
    pub fn has_solution(self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Solution {
    pub status: Status,
    pub objective: i32,
    pub solution: HashMap<String, i64>,
    pub error: Option<String>,
}

impl Solution {
    pub fn value(&self, id: &str) -> i64 {
        self.solution.get(id).copied().unwrap_or(0)
    }
}
