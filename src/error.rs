//! Error taxonomy for the scheduling pipeline.
//!
//! Four kinds reach the caller of [`Engine::process`](crate::engine::Engine::process):
//! malformed input, proven infeasibility, solver breakdown, and an
//! extracted schedule that fails re-verification.

use crate::entities::{PresenterId, RoomId, SessionId, TimeslotId};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Top-level failure of a scheduling run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Malformed input, detected before any model is built.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// No assignment satisfies every hard constraint.
    #[error("no feasible schedule: {reason}")]
    Infeasible { reason: InfeasibilityReason },

    /// The solving process broke down without proving infeasibility.
    #[error("solver failure: {0}")]
    Solver(#[from] SolverFailure),

    /// The solver reported success but the extracted schedule is invalid.
    #[error("internal consistency error: {} invariant violation(s), first: {}", .violations.len(), first_violation(.violations))]
    InternalConsistency { violations: Vec<Violation> },
}

impl ScheduleError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }

    pub fn is_solver_failure(&self) -> bool {
        matches!(self, Self::Solver(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InternalConsistency { .. })
    }
}

fn first_violation(violations: &[Violation]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".into())
}

/// Input rejected before model building.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("at least one room is required")]
    NoRooms,

    #[error("at least one timeslot is required")]
    NoTimeslots,

    #[error("duplicate session id {0}")]
    DuplicateSession(SessionId),

    #[error("duplicate room id {0}")]
    DuplicateRoom(RoomId),

    #[error("duplicate timeslot id {0}")]
    DuplicateTimeslot(TimeslotId),

    #[error("room {room} has negative capacity {capacity}")]
    NegativeCapacity { room: RoomId, capacity: i32 },

    #[error("session {session} requires negative capacity {capacity}")]
    NegativeRequirement { session: SessionId, capacity: i32 },

    #[error("session {session} has non-finite preference {weight} for timeslot {timeslot}")]
    InvalidPreference {
        session: SessionId,
        timeslot: TimeslotId,
        weight: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Why an instance has no feasible schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfeasibilityReason {
    #[error("session {0} has no usable (room, timeslot) pair")]
    NoCandidates(SessionId),

    #[error("{sessions} sessions exceed {cells} available room/timeslot cells")]
    NotEnoughCells { sessions: usize, cells: usize },

    #[error("presenter {presenter} gives {sessions} sessions but only {timeslots} timeslots are usable")]
    PresenterOverbooked {
        presenter: PresenterId,
        sessions: usize,
        timeslots: usize,
    },

    #[error("solver proved the model infeasible")]
    ProvenBySolver,
}

/// Operational solver failures, distinct from proven infeasibility.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverFailure {
    #[error("time limit reached after {elapsed_ms} ms without a feasible solution")]
    Timeout { elapsed_ms: u64 },

    #[error("solve was cancelled")]
    Cancelled,

    #[error("model rejected by solver: {0}")]
    ModelInvalid(String),

    #[error("solver `{solver}` stopped without a result")]
    Unknown { solver: String },
}

/// A single invariant broken by an extracted schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("session {0} is not assigned")]
    Unassigned(SessionId),

    #[error("session {session} is assigned {count} times")]
    AssignedMultipleTimes { session: SessionId, count: usize },

    #[error("room {room} at timeslot {timeslot} hosts sessions {first} and {second}")]
    RoomConflict {
        room: RoomId,
        timeslot: TimeslotId,
        first: SessionId,
        second: SessionId,
    },

    #[error("session {session} placed in timeslot {timeslot} where a presenter is unavailable")]
    Unavailable {
        session: SessionId,
        timeslot: TimeslotId,
    },

    #[error("presenter {presenter} has sessions {first} and {second} at timeslot {timeslot}")]
    PresenterConflict {
        presenter: PresenterId,
        timeslot: TimeslotId,
        first: SessionId,
        second: SessionId,
    },

    #[error("session {session} needs capacity {required} but room {room} holds {capacity}")]
    CapacityExceeded {
        session: SessionId,
        room: RoomId,
        required: i32,
        capacity: i32,
    },

    #[error("assignment references unknown {kind} {id}")]
    UnknownEntity { kind: &'static str, id: u32 },

    #[error("solution has {actual} values for a model with {expected} variables")]
    ValueCountMismatch { expected: usize, actual: usize },
}
