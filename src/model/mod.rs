//! Binary linear modelling layer.
//!
//! A domain-agnostic container for 0/1 decision variables, unit-coefficient
//! linear rows (`== rhs` / `<= rhs`), and a linear objective. The
//! [`builder`](crate::builder) module translates a scheduling instance into
//! this form; any [`BinarySolver`](crate::solver::BinarySolver) consumes it.
//!
//! # Key Components
//!
//! - **Variables**: [`BinaryVar`], addressed by dense [`VarId`]s
//! - **Constraints**: [`LinearConstraint`] with a [`Sense`]
//! - **Model**: [`BinaryModel`] with an [`Objective`]

mod model;
mod variables;

pub use model::{BinaryModel, LinearConstraint, Objective, Sense};
pub use variables::{BinaryVar, VarId};
