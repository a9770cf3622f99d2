//! Scheduling engine.
//!
//! Orchestrates the pipeline for one instance:
//!
//! 1. [`ModelBuilder`](crate::builder::ModelBuilder) validates the input
//!    and builds the 0/1 model
//! 2. optional presolve proves trivial infeasibility early
//! 3. a [`BinarySolver`](crate::solver::BinarySolver) solves the model
//! 4. [`extract`](crate::extract::extract) maps and re-verifies the result
//!
//! The pipeline is strictly sequential within a call and keeps no state
//! across calls.

mod config;
mod runner;

pub use config::EngineConfig;
pub use runner::{Engine, Instance};
