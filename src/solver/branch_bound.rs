//! Depth-first branch and bound over unit-coefficient 0/1 rows.
//!
//! # Algorithm
//!
//! 1. Propagate fixings and forced rows at the root
//! 2. At each node:
//!    a. Bound: current objective plus, per open `==` row, the remaining
//!       count times its best free weight; prune if not above the incumbent
//!    b. Pick the open `==` row with the fewest free variables
//!       (fail-first) and branch on its heaviest free variable,
//!       `x = 1` first, then `x = 0`
//!    c. Without open `==` rows, branch on the best positive free variable
//!    d. Otherwise the node is a leaf: remaining variables are 0
//! 3. Every assignment runs unit propagation: a row at its right-hand
//!    side zeroes its free variables, an `==` row that needs all its free
//!    variables sets them to 1
//!
//! Exhausting the tree proves optimality (or infeasibility).

use super::config::SolverConfig;
use super::types::{BinarySolver, Solution, SolverStatus};
use crate::model::{BinaryModel, Sense};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

const EPSILON: f64 = 1e-9;

/// Exact 0/1 solver used by default.
///
/// Handles every [`BinaryModel`]; the bound is tight for scheduling
/// models with uniform weights, where the first complete assignment is
/// already proven optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBoundSolver;

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self
    }
}

impl BinarySolver for BranchAndBoundSolver {
    fn name(&self) -> &str {
        "branch-and-bound"
    }

    fn solve(
        &self,
        model: &BinaryModel,
        config: &SolverConfig,
        cancel: Option<&AtomicBool>,
    ) -> Solution {
        if let Err(msg) = model.validate().and_then(|_| config.validate()) {
            return Solution::empty(SolverStatus::ModelInvalid).with_message(msg);
        }

        let start = Instant::now();
        let mut search = Search::new(model, config, cancel, start);
        let root_ok = search.propagate_root();
        if root_ok {
            search.dfs();
        }

        let solve_time_ms = start.elapsed().as_millis() as u64;
        let nodes = search.nodes;
        let status = match (search.stop, &search.incumbent) {
            (Some(Stop::Cancelled), _) => SolverStatus::Cancelled,
            (Some(Stop::TimeLimit), None) => SolverStatus::Timeout,
            (Some(_), Some(_)) => SolverStatus::Feasible,
            (None, Some(_)) => SolverStatus::Optimal,
            (None, None) => SolverStatus::Infeasible,
            (Some(Stop::FirstFound), None) => SolverStatus::Unknown,
        };

        let mut solution = Solution::empty(status);
        solution.nodes = nodes;
        solution.solve_time_ms = solve_time_ms;
        if matches!(status, SolverStatus::Optimal | SolverStatus::Feasible) {
            if let Some((values, _)) = search.incumbent.take() {
                solution.objective_value = Some(model.objective.evaluate(&values));
                solution.values = values;
            }
        }
        solution
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    Free,
    Zero,
    One,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    TimeLimit,
    Cancelled,
    FirstFound,
}

struct Row {
    terms: Vec<usize>,
    equal: bool,
    rhs: u32,
}

struct Search<'a> {
    model: &'a BinaryModel,
    config: &'a SolverConfig,
    cancel: Option<&'a AtomicBool>,
    start: Instant,

    rows: Vec<Row>,
    var_rows: Vec<Vec<usize>>,
    weights: Vec<f64>,
    in_equal_row: Vec<bool>,

    value: Vec<Value>,
    row_ones: Vec<u32>,
    row_free: Vec<u32>,
    trail: Vec<usize>,
    objective: f64,

    incumbent: Option<(Vec<bool>, f64)>,
    nodes: u64,
    stop: Option<Stop>,
    rng: Option<StdRng>,
}

impl<'a> Search<'a> {
    fn new(
        model: &'a BinaryModel,
        config: &'a SolverConfig,
        cancel: Option<&'a AtomicBool>,
        start: Instant,
    ) -> Self {
        let n = model.var_count();
        let rows: Vec<Row> = model
            .constraints
            .iter()
            .map(|c| Row {
                terms: c.terms.iter().map(|v| v.index()).collect(),
                equal: c.sense == Sense::Equal,
                rhs: c.rhs,
            })
            .collect();
        let var_rows = model.constraints_of();
        let mut in_equal_row = vec![false; n];
        for row in rows.iter().filter(|r| r.equal) {
            for &t in &row.terms {
                in_equal_row[t] = true;
            }
        }
        let row_free = rows.iter().map(|r| r.terms.len() as u32).collect();
        let row_ones = vec![0; rows.len()];

        Self {
            model,
            config,
            cancel,
            start,
            weights: model.objective.maximization_weights(n),
            rows,
            var_rows,
            in_equal_row,
            value: vec![Value::Free; n],
            row_ones,
            row_free,
            trail: Vec::with_capacity(n),
            objective: 0.0,
            incumbent: None,
            nodes: 0,
            stop: None,
            rng: config.seed.map(StdRng::seed_from_u64),
        }
    }

    /// Applies fixed variables and checks every row once.
    fn propagate_root(&mut self) -> bool {
        let mut queue: Vec<(usize, bool)> = self
            .model
            .vars
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.fixed.map(|f| (i, f)))
            .collect();
        for r in 0..self.rows.len() {
            if !self.enqueue_row(r, &mut queue) {
                return false;
            }
        }
        self.propagate(queue)
    }

    fn dfs(&mut self) {
        if self.should_stop() {
            return;
        }
        self.nodes += 1;

        if let Some((_, best)) = self.incumbent {
            if self.upper_bound() <= best + EPSILON {
                return;
            }
        }

        let branch_var = match self.pick_row() {
            Some(r) => self.free_terms_by_weight(r).first().copied(),
            None => match self.best_positive_free() {
                Some(v) => Some(v),
                None => {
                    self.record_leaf();
                    return;
                }
            },
        };
        let Some(v) = branch_var else {
            return;
        };

        for on in [true, false] {
            let mark = self.trail.len();
            if self.propagate(vec![(v, on)]) {
                self.dfs();
            }
            self.undo(mark);
            if self.stop.is_some() {
                break;
            }
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stop.is_some() {
            return true;
        }
        if self
            .cancel
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            self.stop = Some(Stop::Cancelled);
            return true;
        }
        if self.config.time_limit_ms > 0
            && self.nodes % self.config.check_interval == 0
            && self.start.elapsed().as_millis() as u64 >= self.config.time_limit_ms
        {
            self.stop = Some(Stop::TimeLimit);
            return true;
        }
        false
    }

    /// Open `==` row with the fewest free variables.
    fn pick_row(&self) -> Option<usize> {
        (0..self.rows.len())
            .filter(|&r| self.rows[r].equal && self.row_ones[r] < self.rows[r].rhs)
            .min_by_key(|&r| (self.row_free[r], r))
    }

    fn free_terms_by_weight(&mut self, r: usize) -> Vec<usize> {
        let mut free: Vec<usize> = self.rows[r]
            .terms
            .iter()
            .copied()
            .filter(|&t| self.value[t] == Value::Free)
            .collect();
        if let Some(rng) = self.rng.as_mut() {
            free.shuffle(rng);
        }
        let weights = &self.weights;
        free.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
        free
    }

    fn best_positive_free(&self) -> Option<usize> {
        (0..self.value.len())
            .filter(|&v| self.value[v] == Value::Free && self.weights[v] > EPSILON)
            .max_by(|&a, &b| self.weights[a].total_cmp(&self.weights[b]).then(b.cmp(&a)))
    }

    fn upper_bound(&self) -> f64 {
        let mut bound = self.objective;
        for (r, row) in self.rows.iter().enumerate() {
            if !row.equal || self.row_ones[r] >= row.rhs {
                continue;
            }
            let best = row
                .terms
                .iter()
                .filter(|&&t| self.value[t] == Value::Free)
                .map(|&t| self.weights[t])
                .fold(f64::NEG_INFINITY, f64::max);
            if best.is_finite() {
                bound += f64::from(row.rhs - self.row_ones[r]) * best.max(0.0);
            }
        }
        for v in 0..self.value.len() {
            if self.value[v] == Value::Free && !self.in_equal_row[v] {
                bound += self.weights[v].max(0.0);
            }
        }
        bound
    }

    fn record_leaf(&mut self) {
        let improves = self
            .incumbent
            .as_ref()
            .is_none_or(|(_, best)| self.objective > best + EPSILON);
        if !improves {
            return;
        }
        let values: Vec<bool> = self.value.iter().map(|&v| v == Value::One).collect();
        debug_assert!(self.model.is_feasible(&values));
        self.incumbent = Some((values, self.objective));
        if self.config.stop_after_first {
            self.stop = Some(Stop::FirstFound);
        }
    }

    /// Assigns and propagates. Returns false on conflict; the caller
    /// undoes to its trail mark either way.
    fn propagate(&mut self, mut queue: Vec<(usize, bool)>) -> bool {
        while let Some((v, on)) = queue.pop() {
            match (self.value[v], on) {
                (Value::Free, _) => {}
                (Value::One, true) | (Value::Zero, false) => continue,
                _ => return false,
            }
            self.set(v, on);
            for k in 0..self.var_rows[v].len() {
                let r = self.var_rows[v][k];
                if !self.enqueue_row(r, &mut queue) {
                    return false;
                }
            }
        }
        true
    }

    /// Checks a row and queues any forced values.
    fn enqueue_row(&self, r: usize, queue: &mut Vec<(usize, bool)>) -> bool {
        let row = &self.rows[r];
        let ones = self.row_ones[r];
        let free = self.row_free[r];
        if ones > row.rhs || (row.equal && ones + free < row.rhs) {
            return false;
        }
        if free == 0 {
            return true;
        }
        let forced = if ones == row.rhs {
            Some(false)
        } else if row.equal && ones + free == row.rhs {
            Some(true)
        } else {
            None
        };
        if let Some(on) = forced {
            queue.extend(
                row.terms
                    .iter()
                    .filter(|&&t| self.value[t] == Value::Free)
                    .map(|&t| (t, on)),
            );
        }
        true
    }

    fn set(&mut self, v: usize, on: bool) {
        self.value[v] = if on { Value::One } else { Value::Zero };
        self.trail.push(v);
        if on {
            self.objective += self.weights[v];
        }
        for &r in &self.var_rows[v] {
            self.row_free[r] -= 1;
            if on {
                self.row_ones[r] += 1;
            }
        }
    }

    fn undo(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some(v) = self.trail.pop() else {
                break;
            };
            let on = self.value[v] == Value::One;
            if on {
                self.objective -= self.weights[v];
            }
            for &r in &self.var_rows[v] {
                self.row_free[r] += 1;
                if on {
                    self.row_ones[r] -= 1;
                }
            }
            self.value[v] = Value::Free;
        }
    }
}
