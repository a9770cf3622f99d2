//! Conference session scheduling.
//!
//! Assigns conference sessions to (room, timeslot) pairs so that every
//! hard constraint holds and, among feasible schedules, presenters'
//! timeslot preferences are best met:
//!
//! - **Entities**: [`Session`](entities::Session), [`Room`](entities::Room),
//!   [`Timeslot`](entities::Timeslot), and the output
//!   [`Assignment`](entities::Assignment).
//! - **Model**: a domain-agnostic 0/1 linear model.
//! - **Builder**: translates an instance into the model (coverage,
//!   room exclusivity, presenter availability, presenter non-overlap,
//!   capacity).
//! - **Solver**: the [`BinarySolver`](solver::BinarySolver) adapter trait
//!   and a built-in branch-and-bound back-end.
//! - **Extract**: maps solved values back to assignments and re-verifies
//!   every invariant.
//! - **Engine**: the public entry point, [`Engine::process`](engine::Engine::process).
//!
//! # Failures
//!
//! [`ScheduleError`](error::ScheduleError) separates invalid input,
//! proven infeasibility, solver breakdown, and internal inconsistency.
//!
//! # Examples
//!
//! ```
//! use u_confsched::engine::Engine;
//! use u_confsched::entities::{Room, SessionCollection, Timeslot};
//! use u_confsched::schedule::Schedule;
//!
//! let mut sessions = SessionCollection::new();
//! sessions.add(1, 1, &[2]); // presenter 1 cannot do timeslot 2
//! sessions.add(2, 2, &[2]);
//! sessions.add(3, 3, &[]);
//!
//! let rooms = vec![Room::new(1, 10)];
//! let timeslots: Vec<Timeslot> = (1..=3).map(Timeslot::new).collect();
//!
//! let assignments = Engine::new()
//!     .process(sessions.as_slice(), &rooms, &timeslots)
//!     .unwrap();
//! let schedule = Schedule::new(assignments);
//! assert_eq!(schedule.at(1.into(), 2.into()), Some(3.into()));
//! ```

pub mod builder;
pub mod engine;
pub mod entities;
pub mod error;
pub mod extract;
pub mod model;
pub mod schedule;
pub mod solver;

pub use engine::{Engine, EngineConfig};
pub use error::{Result, ScheduleError};
