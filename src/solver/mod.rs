//! Solver adapter.
//!
//! [`BinarySolver`] is the narrow boundary between the scheduling pipeline
//! and a 0/1 optimization capability: submit a [`BinaryModel`](crate::model::BinaryModel),
//! get back values, a proof of infeasibility, or a failure status.
//! Alternative back-ends (MIP solvers, SAT encodings) plug in behind the
//! same trait without touching the builder or extractor.
//!
//! [`BranchAndBoundSolver`] is the built-in exact back-end.

mod branch_bound;
mod config;
mod types;

pub use branch_bound::BranchAndBoundSolver;
pub use config::SolverConfig;
pub use types::{BinarySolver, Solution, SolverStatus};
