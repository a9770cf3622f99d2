//! Solver interface and result types.

use super::config::SolverConfig;
use crate::model::BinaryModel;
use std::sync::atomic::AtomicBool;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// Solver exceeded time limit before finding any solution.
    Timeout,
    /// Solve was aborted through the cancellation token.
    Cancelled,
    /// No solution found for unknown reasons.
    Unknown,
}

/// Result of a solver run.
///
/// `values` holds one entry per model variable when a solution was
/// found and is empty otherwise.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solver status.
    pub status: SolverStatus,
    /// Variable values, indexed by [`VarId`](crate::model::VarId).
    pub values: Vec<bool>,
    /// Objective function value in the model's own sense.
    pub objective_value: Option<f64>,
    /// Search nodes explored.
    pub nodes: u64,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
    /// Diagnostic message (e.g. why a model was rejected).
    pub message: Option<String>,
}

impl Solution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
            nodes: 0,
            solve_time_ms: 0,
            message: None,
        }
    }

    /// Attaches a diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Indices of variables set to 1.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
    }
}

/// Trait for 0/1 solver back-ends.
///
/// Implementors submit a [`BinaryModel`] to some solving capability and
/// report back values or a status. They interpret no scheduling semantics
/// and perform no retries.
///
/// A set `cancel` flag must make the solver return
/// [`SolverStatus::Cancelled`] with no values, never a partial result.
pub trait BinarySolver: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Solves the model and returns a solution.
    fn solve(
        &self,
        model: &BinaryModel,
        config: &SolverConfig,
        cancel: Option<&AtomicBool>,
    ) -> Solution;
}
