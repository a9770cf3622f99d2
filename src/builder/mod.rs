//! Constraint model builder.
//!
//! Converts sessions, rooms, and timeslots into a [`BinaryModel`](crate::model::BinaryModel)
//! plus a [`VariableIndex`] for reading solutions back. The builder is a
//! pure function of its inputs and holds no shared state, so independent
//! instances can be built concurrently.

mod index;
mod presolve;
mod runner;

pub use index::{ExclusionTable, VariableIndex};
pub use presolve::presolve;
pub use runner::{validate_instance, BuiltModel, ModelBuilder};
