//! Entity layer.
//!
//! Immutable value types describing a scheduling instance: [`Session`],
//! [`Room`], [`Timeslot`], [`Presenter`], and the output [`Assignment`].
//! Entities carry identity and structural data only; all scheduling
//! behavior lives in the builder, solver, and extractor layers.

mod collection;
mod ids;
mod types;

pub use collection::SessionCollection;
pub use ids::{PresenterId, RoomId, SessionId, TimeslotId};
pub use types::{Assignment, Presenter, Room, Session, Timeslot, DEFAULT_PREFERENCE};
