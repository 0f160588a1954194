//! Slide ordering.
//!
//! `Exact` solves the maximum-weight Hamiltonian path over the slides. An
//! anchor node joined to every slide by zero-weight arcs turns the path
//! into a cycle, which is found by solving the assignment relaxation and
//! cutting off the subtours of each solution until a single cycle is left.
//! `Greedy` builds a nearest-neighbour path and never calls a solver; it
//! is only used when asked for.

use std::cmp::Reverse;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::domain::solver::Solver;
use crate::domain::tour::{cycles, TourModel};
use crate::error::{Result, SlideshowError};
use crate::models::SolverDirection;
use crate::slideshow::score::score;
use crate::slideshow::slides::Slide;

pub const DEFAULT_MAX_ROUNDS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStrategy {
    Exact,
    Greedy,
}

impl OrderStrategy {
    /// Parse strategy from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Some(OrderStrategy::Exact),
            "greedy" => Some(OrderStrategy::Greedy),
            _ => None,
        }
    }
}

pub struct SlideOrderer {
    solver: Box<dyn Solver>,
    strategy: OrderStrategy,
    time_limit: Option<Duration>,
    max_rounds: usize,
    model_dump: Option<PathBuf>,
}

impl SlideOrderer {
    pub fn new(solver: Box<dyn Solver>) -> Self {
        SlideOrderer {
            solver,
            strategy: OrderStrategy::Exact,
            time_limit: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
            model_dump: None,
        }
    }

    pub fn with_strategy(mut self, strategy: OrderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Wall-clock budget shared by all subtour rounds.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Write the first-round model as JSON before solving.
    pub fn with_model_dump(mut self, path: Option<PathBuf>) -> Self {
        self.model_dump = path;
        self
    }

    /// Returns a permutation of `0..slides.len()`.
    pub fn order(&self, slides: &[Slide]) -> Result<Vec<usize>> {
        if slides.len() <= 1 {
            return Ok((0..slides.len()).collect());
        }
        match self.strategy {
            OrderStrategy::Exact => self.exact_order(slides),
            OrderStrategy::Greedy => Ok(greedy_order(slides)),
        }
    }

    fn exact_order(&self, slides: &[Slide]) -> Result<Vec<usize>> {
        let anchor = slides.len();
        let mut model = TourModel::new(&weights_with_anchor(slides));

        if let Some(path) = &self.model_dump {
            fs::write(path, serde_json::to_string_pretty(&model.to_request())?)?;
            log::info!("Wrote ordering model to {}", path.display());
        }

        let started = Instant::now();
        for round in 1..=self.max_rounds {
            let remaining = match self.time_limit {
                Some(limit) => {
                    let left = limit.saturating_sub(started.elapsed());
                    if left.is_zero() {
                        return Err(SlideshowError::OptimizationInfeasible(format!(
                            "time limit of {:?} reached after {} rounds",
                            limit,
                            round - 1
                        )));
                    }
                    Some(left)
                }
                None => None,
            };

            log::debug!(
                "Round {}: solving {} arcs, {} rows ({} cuts) with {}",
                round,
                model.polyhedron().variables.len(),
                model.polyhedron().a.shape.nrows,
                model.cut_count(),
                self.solver.name(),
            );
            let solution = self.solver.solve(
                model.polyhedron(),
                model.objective(),
                SolverDirection::Maximize,
                remaining,
            )?;

            if !solution.status.has_solution() {
                return Err(SlideshowError::OptimizationInfeasible(format!(
                    "{} returned status {:?}{}",
                    self.solver.name(),
                    solution.status,
                    solution.error.map(|e| format!(": {}", e)).unwrap_or_default(),
                )));
            }

            let successor = model.successors(&solution)?;
            let subtours = cycles(&successor);
            if subtours.len() == 1 {
                log::info!(
                    "Found single tour in {} rounds, objective {}",
                    round,
                    solution.objective
                );
                return Ok(path_from_anchor(&successor, anchor));
            }

            log::debug!("Round {}: {} subtours, adding cuts", round, subtours.len());
            for subtour in &subtours {
                model.add_subtour_cut(subtour);
            }
        }

        Err(SlideshowError::OptimizationInfeasible(format!(
            "no single tour after {} rounds",
            self.max_rounds
        )))
    }
}

/// Nearest-neighbour path from slide 0; ties go to the lowest index.
pub fn greedy_order(slides: &[Slide]) -> Vec<usize> {
    if slides.is_empty() {
        return Vec::new();
    }

    let mut visited = vec![false; slides.len()];
    let mut order = Vec::with_capacity(slides.len());
    let mut current = 0;
    visited[current] = true;
    order.push(current);

    while order.len() < slides.len() {
        let next = (0..slides.len())
            .filter(|&j| !visited[j])
            .max_by_key(|&j| (score(&slides[current].tags, &slides[j].tags), Reverse(j)));
        let Some(next) = next else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// Total interest of consecutive slides in `order`.
pub fn path_score(slides: &[Slide], order: &[usize]) -> usize {
    order
        .windows(2)
        .map(|w| score(&slides[w[0]].tags, &slides[w[1]].tags))
        .sum()
}

// Slide scores plus a zero-weight anchor as the last node.
fn weights_with_anchor(slides: &[Slide]) -> Vec<Vec<i32>> {
    let n = slides.len();
    let mut weights = vec![vec![0; n + 1]; n + 1];
    for i in 0..n {
        for j in (i + 1)..n {
            let w = score(&slides[i].tags, &slides[j].tags) as i32;
            weights[i][j] = w;
            weights[j][i] = w;
        }
    }
    weights
}

fn path_from_anchor(successor: &[usize], anchor: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(anchor);
    let mut node = successor[anchor];
    while node != anchor {
        order.push(node);
        node = successor[node];
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solvers::GlpkSolver;
    use crate::domain::tour::arc_id;
    use crate::domain::validate::SolveInputError;
    use crate::models::{Objective, Solution, SparseLEIntegerPolyhedron, Status};
    use parking_lot::Mutex;
    use std::collections::HashMap;

    fn slide(id: usize, tags: &[&str]) -> Slide {
        Slide {
            photo_ids: vec![id],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn assert_permutation(order: &[usize], n: usize) {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    fn best_path_score(slides: &[Slide]) -> usize {
        fn extend(slides: &[Slide], order: &mut Vec<usize>, used: &mut [bool], best: &mut usize) {
            if order.len() == slides.len() {
                *best = (*best).max(path_score(slides, order));
                return;
            }
            for i in 0..slides.len() {
                if !used[i] {
                    used[i] = true;
                    order.push(i);
                    extend(slides, order, used, best);
                    order.pop();
                    used[i] = false;
                }
            }
        }
        let mut best = 0;
        extend(slides, &mut Vec::new(), &mut vec![false; slides.len()], &mut best);
        best
    }

    // Two triangles of mutually interesting slides with nothing in between:
    // the assignment relaxation prefers a closed triangle over any path.
    fn two_triangles() -> Vec<Slide> {
        vec![
            slide(0, &["a1", "a2"]),
            slide(1, &["a2", "a3"]),
            slide(2, &["a3", "a1"]),
            slide(3, &["b1", "b2"]),
            slide(4, &["b2", "b3"]),
            slide(5, &["b3", "b1"]),
        ]
    }

    /// Replays canned assignments and records the row count it was given.
    struct ScriptedSolver {
        responses: Mutex<Vec<Solution>>,
        rows_seen: Mutex<Vec<usize>>,
    }

    impl ScriptedSolver {
        fn new(mut responses: Vec<Solution>) -> Self {
            responses.reverse();
            ScriptedSolver {
                responses: Mutex::new(responses),
                rows_seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Solver for &'static ScriptedSolver {
        fn solve(
            &self,
            polyhedron: &SparseLEIntegerPolyhedron,
            _objective: &Objective,
            _direction: SolverDirection,
            _time_limit: Option<Duration>,
        ) -> std::result::Result<Solution, SolveInputError> {
            self.rows_seen.lock().push(polyhedron.a.shape.nrows);
            self.responses
                .lock()
                .pop()
                .ok_or_else(|| SolveInputError::new("script exhausted"))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn arcs(status: Status, arcs: &[(usize, usize)]) -> Solution {
        Solution {
            status,
            objective: 0,
            solution: arcs.iter().map(|&(i, j)| (arc_id(i, j), 1)).collect::<HashMap<_, _>>(),
            error: None,
        }
    }

    fn scripted(responses: Vec<Solution>) -> &'static ScriptedSolver {
        Box::leak(Box::new(ScriptedSolver::new(responses)))
    }

    #[test]
    fn test_order_given_no_or_one_slide_should_not_call_solver() {
        let solver = scripted(Vec::new());
        let orderer = SlideOrderer::new(Box::new(solver));
        assert!(orderer.order(&[]).unwrap().is_empty());
        assert_eq!(orderer.order(&[slide(0, &["a"])]).unwrap(), vec![0]);
        assert!(solver.rows_seen.lock().is_empty());
    }

    #[test]
    fn test_exact_given_subtours_should_cut_and_resolve() {
        let slides = vec![slide(0, &["a"]), slide(1, &["b"]), slide(2, &["c"])];
        // anchor is node 3
        let solver = scripted(vec![
            arcs(Status::Optimal, &[(0, 1), (1, 0), (2, 3), (3, 2)]),
            arcs(Status::Optimal, &[(3, 2), (2, 0), (0, 1), (1, 3)]),
        ]);
        let orderer = SlideOrderer::new(Box::new(solver));

        assert_eq!(orderer.order(&slides).unwrap(), vec![2, 0, 1]);
        let rows = solver.rows_seen.lock().clone();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], rows[0] + 2);
    }

    #[test]
    fn test_exact_given_infeasible_status_should_fail() {
        let slides = vec![slide(0, &["a"]), slide(1, &["b"])];
        let solver = scripted(vec![arcs(Status::NoFeasible, &[])]);
        let orderer = SlideOrderer::new(Box::new(solver));

        assert!(matches!(
            orderer.order(&slides),
            Err(SlideshowError::OptimizationInfeasible(_))
        ));
    }

    #[test]
    fn test_exact_given_round_limit_should_fail_without_fallback() {
        let slides = vec![slide(0, &["a"]), slide(1, &["b"]), slide(2, &["c"])];
        let cover = arcs(Status::Optimal, &[(0, 1), (1, 0), (2, 3), (3, 2)]);
        let solver = scripted(vec![cover.clone(), cover]);
        let orderer = SlideOrderer::new(Box::new(solver)).with_max_rounds(2);

        assert!(matches!(
            orderer.order(&slides),
            Err(SlideshowError::OptimizationInfeasible(_))
        ));
    }

    #[test]
    fn test_exact_given_spent_time_limit_should_fail() {
        let slides = vec![slide(0, &["a"]), slide(1, &["b"])];
        let solver = scripted(Vec::new());
        let orderer = SlideOrderer::new(Box::new(solver)).with_time_limit(Some(Duration::ZERO));

        assert!(matches!(
            orderer.order(&slides),
            Err(SlideshowError::OptimizationInfeasible(_))
        ));
    }

    #[test]
    fn test_exact_with_glpk_given_tiny_time_limit_should_fail() {
        let order = SlideOrderer::new(Box::new(GlpkSolver::new()))
            .with_time_limit(Some(Duration::from_nanos(1)))
            .order(&two_triangles());

        assert!(matches!(order, Err(SlideshowError::OptimizationInfeasible(_))));
    }

    #[test]
    fn test_exact_with_glpk_joins_disconnected_groups() {
        let slides = two_triangles();
        let order = SlideOrderer::new(Box::new(GlpkSolver::new()))
            .order(&slides)
            .unwrap();

        assert_permutation(&order, slides.len());
        assert_eq!(path_score(&slides, &order), 4);
    }

    #[test]
    fn test_exact_with_glpk_matches_brute_force() {
        let slides = vec![
            slide(0, &["a", "b", "c"]),
            slide(1, &["b", "c", "d", "e"]),
            slide(2, &["a", "e"]),
            slide(3, &["c", "d", "f", "g"]),
            slide(4, &["a", "b", "f", "g"]),
            slide(5, &["e", "g"]),
        ];
        let order = SlideOrderer::new(Box::new(GlpkSolver::new()))
            .order(&slides)
            .unwrap();

        assert_permutation(&order, slides.len());
        assert_eq!(path_score(&slides, &order), best_path_score(&slides));
    }

    #[test]
    fn test_model_dump_writes_solver_request() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("model.json");
        let slides = vec![slide(0, &["a", "b"]), slide(1, &["b", "c"])];

        SlideOrderer::new(Box::new(GlpkSolver::new()))
            .with_model_dump(Some(dump.clone()))
            .order(&slides)
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(dump).unwrap()).unwrap();
        assert_eq!(json["direction"], "maximize");
        // 3 nodes including the anchor
        assert_eq!(json["polyhedron"]["variables"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_greedy_follows_best_neighbour() {
        let slides = vec![
            slide(0, &["a", "b"]),
            slide(1, &["x", "y"]),
            slide(2, &["b", "c"]),
            slide(3, &["c", "d"]),
        ];
        assert_eq!(greedy_order(&slides), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_greedy_strategy_returns_permutation() {
        let slides: Vec<Slide> = (0..4).map(|i| slide(i, &["t"])).collect();
        let order = SlideOrderer::new(Box::new(GlpkSolver::new()))
            .with_strategy(OrderStrategy::Greedy)
            .order(&slides)
            .unwrap();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_order_strategy_from_str() {
        assert_eq!(OrderStrategy::from_str("Exact"), Some(OrderStrategy::Exact));
        assert_eq!(OrderStrategy::from_str("greedy"), Some(OrderStrategy::Greedy));
        assert_eq!(OrderStrategy::from_str("random"), None);
    }
}
