//! Result extractor and validator.
//!
//! Maps solved variable values back to [`Assignment`](crate::entities::Assignment)s
//! and re-checks every schedule invariant against the input entities.
//! A schedule that fails re-verification despite a successful solver
//! status is reported as an internal consistency error, never returned.

mod runner;
mod verify;

pub use runner::extract;
pub use verify::verify;
