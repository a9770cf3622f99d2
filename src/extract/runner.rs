//! Mapping solver output back to assignments.

use super::verify::verify;
use crate::builder::BuiltModel;
use crate::entities::{Assignment, Room, Session, Timeslot};
use crate::error::{InfeasibilityReason, Result, ScheduleError, SolverFailure, Violation};
use crate::model::VarId;
use crate::solver::{Solution, SolverStatus};
use tracing::{debug, error};

/// Turns a solver result into a verified assignment list.
///
/// - `Optimal` / `Feasible`: one [`Assignment`] per variable set to 1,
///   then [`verify`] against the entities; any violation is an
///   [`ScheduleError::InternalConsistency`]
/// - `Infeasible`: [`ScheduleError::Infeasible`], no partial extraction
/// - anything else: [`ScheduleError::Solver`]
///
/// The returned list is sorted by (timeslot, room).
pub fn extract(
    solution: &Solution,
    solver_name: &str,
    built: &BuiltModel,
    sessions: &[Session],
    rooms: &[Room],
    timeslots: &[Timeslot],
) -> Result<Vec<Assignment>> {
    match solution.status {
        SolverStatus::Optimal | SolverStatus::Feasible => {}
        SolverStatus::Infeasible => {
            return Err(ScheduleError::Infeasible {
                reason: InfeasibilityReason::ProvenBySolver,
            })
        }
        SolverStatus::Timeout => {
            return Err(SolverFailure::Timeout {
                elapsed_ms: solution.solve_time_ms,
            }
            .into())
        }
        SolverStatus::Cancelled => return Err(SolverFailure::Cancelled.into()),
        SolverStatus::ModelInvalid => {
            return Err(SolverFailure::ModelInvalid(
                solution.message.clone().unwrap_or_default(),
            )
            .into())
        }
        SolverStatus::Unknown => {
            return Err(SolverFailure::Unknown {
                solver: solver_name.to_string(),
            }
            .into())
        }
    }

    let expected = built.model.var_count();
    if solution.values.len() != expected {
        let violations = vec![Violation::ValueCountMismatch {
            expected,
            actual: solution.values.len(),
        }];
        error!(solver = solver_name, expected, actual = solution.values.len(), "solution does not match model");
        return Err(ScheduleError::InternalConsistency { violations });
    }

    let mut assignments: Vec<Assignment> = solution
        .selected()
        .filter_map(|i| built.index.get(VarId(i)).copied())
        .collect();
    assignments.sort_by_key(|a| (a.timeslot_id, a.room_id, a.session_id));

    let violations = verify(&assignments, sessions, rooms, timeslots);
    if !violations.is_empty() {
        for v in &violations {
            error!(solver = solver_name, violation = %v, "extracted schedule failed verification");
        }
        return Err(ScheduleError::InternalConsistency { violations });
    }

    debug!(
        assignments = assignments.len(),
        objective = ?solution.objective_value,
        "schedule extracted"
    );
    Ok(assignments)
}
