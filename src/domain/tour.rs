//! Assignment formulation of the maximum-weight Hamiltonian cycle.
//!
//! Every ordered node pair `(i, j)` with `i != j` gets a binary arc
//! variable `x_i_j`. Each node has exactly one outgoing and one incoming
//! arc, which alone only guarantees a cycle cover. Subtour cuts added with
//! [`TourModel::add_subtour_cut`] forbid the short cycles of a previous
//! solution, until the solver returns one cycle through all nodes.

use crate::error::{Result, SlideshowError};
use crate::models::{Objective, Solution, SolveRequest, SolverDirection, SparseLEIntegerPolyhedron, Variable};

pub fn arc_id(from: usize, to: usize) -> String {
    format!("x_{}_{}", from, to)
}

#[derive(Debug, Clone)]
pub struct TourModel {
    nodes: usize,
    polyhedron: SparseLEIntegerPolyhedron,
    objective: Objective,
    cuts: usize,
}

impl TourModel {
    /// Builds the degree-constrained model over a square weight matrix.
    pub fn new(weights: &[Vec<i32>]) -> Self {
        let nodes = weights.len();

        let mut variables = Vec::with_capacity(nodes * nodes.saturating_sub(1));
        let mut objective = Objective::new();
        for (i, row) in weights.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                let id = arc_id(i, j);
                if weight != 0 {
                    objective.insert(id.clone(), weight as f64);
                }
                variables.push(Variable::binary(id));
            }
        }

        let mut polyhedron = SparseLEIntegerPolyhedron::new(variables);
        for node in 0..nodes {
            let outgoing: Vec<(usize, i32)> = (0..nodes)
                .filter(|&j| j != node)
                .map(|j| (column(nodes, node, j), 1))
                .collect();
            push_equality(&mut polyhedron, &outgoing, 1);

            let incoming: Vec<(usize, i32)> = (0..nodes)
                .filter(|&i| i != node)
                .map(|i| (column(nodes, i, node), 1))
                .collect();
            push_equality(&mut polyhedron, &incoming, 1);
        }

        TourModel {
            nodes,
            polyhedron,
            objective,
            cuts: 0,
        }
    }

    pub fn cut_count(&self) -> usize {
        self.cuts
    }

    pub fn polyhedron(&self) -> &SparseLEIntegerPolyhedron {
        &self.polyhedron
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Forbids `cycle` as a closed subtour: at most `|C| - 1` arcs inside it.
    pub fn add_subtour_cut(&mut self, cycle: &[usize]) {
        let mut entries = Vec::with_capacity(cycle.len() * cycle.len());
        for &i in cycle {
            for &j in cycle {
                if i != j {
                    entries.push((column(self.nodes, i, j), 1));
                }
            }
        }
        self.polyhedron.push_row(&entries, cycle.len() as i32 - 1);
        self.cuts += 1;
    }

    /// Decodes a 0/1 arc assignment into `successor[node]`.
    ///
    /// Fails if the assignment does not give each node exactly one
    /// successor and one predecessor.
    pub fn successors(&self, solution: &Solution) -> Result<Vec<usize>> {
        let mut successor: Vec<Option<usize>> = vec![None; self.nodes];
        let mut in_degree = vec![0usize; self.nodes];

        for i in 0..self.nodes {
            for j in (0..self.nodes).filter(|&j| j != i) {
                if solution.value(&arc_id(i, j)) <= 0 {
                    continue;
                }
                if successor[i].replace(j).is_some() {
                    return Err(SlideshowError::OptimizationInfeasible(format!(
                        "node {} has more than one successor",
                        i
                    )));
                }
                in_degree[j] += 1;
            }
        }

        if let Some(node) = in_degree.iter().position(|&d| d != 1) {
            return Err(SlideshowError::OptimizationInfeasible(format!(
                "node {} has {} predecessors",
                node, in_degree[node]
            )));
        }

        successor
            .into_iter()
            .enumerate()
            .map(|(node, next)| {
                next.ok_or_else(|| {
                    SlideshowError::OptimizationInfeasible(format!("node {} has no successor", node))
                })
            })
            .collect()
    }

    /// The model in solver-service wire format.
    pub fn to_request(&self) -> SolveRequest {
        SolveRequest {
            polyhedron: self.polyhedron.clone(),
            objectives: vec![self.objective.clone()],
            direction: SolverDirection::Maximize,
        }
    }
}

/// Splits a successor permutation into its cycles, each starting at its
/// smallest node.
pub fn cycles(successor: &[usize]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; successor.len()];
    let mut result = Vec::new();

    for start in 0..successor.len() {
        if visited[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut node = start;
        while !visited[node] {
            visited[node] = true;
            cycle.push(node);
            node = successor[node];
        }
        result.push(cycle);
    }

    result
}

// Column of arc (i, j) when the diagonal is skipped row by row.
fn column(nodes: usize, i: usize, j: usize) -> usize {
    i * (nodes - 1) + if j < i { j } else { j - 1 }
}

fn push_equality(polyhedron: &mut SparseLEIntegerPolyhedron, entries: &[(usize, i32)], rhs: i32) {
    polyhedron.push_row(entries, rhs);
    let negated: Vec<(usize, i32)> = entries.iter().map(|&(col, val)| (col, -val)).collect();
    polyhedron.push_row(&negated, -rhs);
}
