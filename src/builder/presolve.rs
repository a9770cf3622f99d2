//! Cheap infeasibility proofs run before the solver.

use super::runner::BuiltModel;
use crate::entities::{Room, Session, Timeslot, TimeslotId};
use crate::error::InfeasibilityReason;
use std::collections::BTreeSet;

/// Looks for a counting argument that rules out every schedule.
///
/// Checks, in order:
/// 1. a session without any candidate variable
/// 2. more sessions than (room, timeslot) cells
/// 3. a presenter giving more sessions than there are timeslots usable
///    by at least one of those sessions
///
/// Returns `None` when no proof is found; the instance may still be
/// infeasible and the solver decides.
pub fn presolve(
    built: &BuiltModel,
    sessions: &[Session],
    rooms: &[Room],
    timeslots: &[Timeslot],
) -> Option<InfeasibilityReason> {
    if let Some(session) = sessions
        .iter()
        .find(|s| built.index.candidates_of(s.id).is_empty())
    {
        return Some(InfeasibilityReason::NoCandidates(session.id));
    }

    let cells = rooms.len() * timeslots.len();
    if sessions.len() > cells {
        return Some(InfeasibilityReason::NotEnoughCells {
            sessions: sessions.len(),
            cells,
        });
    }

    for (presenter, presenter_sessions) in built.exclusions.presenters() {
        let usable: BTreeSet<TimeslotId> = presenter_sessions
            .iter()
            .flat_map(|&sid| built.index.candidates_of(sid))
            .filter_map(|&var| built.index.get(var))
            .map(|triple| triple.timeslot_id)
            .collect();
        if presenter_sessions.len() > usable.len() {
            return Some(InfeasibilityReason::PresenterOverbooked {
                presenter,
                sessions: presenter_sessions.len(),
                timeslots: usable.len(),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::entities::{PresenterId, SessionId};

    fn run(sessions: &[Session], rooms: &[Room], timeslots: &[Timeslot]) -> Option<InfeasibilityReason> {
        let built = ModelBuilder::build(sessions, rooms, timeslots).unwrap();
        presolve(&built, sessions, rooms, timeslots)
    }

    #[test]
    fn test_feasible_instance_passes() {
        let sessions = vec![Session::new(1), Session::new(2)];
        assert_eq!(run(&sessions, &[Room::new(1, 10)], &[Timeslot::new(1), Timeslot::new(2)]), None);
    }

    #[test]
    fn test_no_candidates() {
        let sessions = vec![Session::new(1).with_presenter_id(1).with_unavailable([1])];
        assert_eq!(
            run(&sessions, &[Room::new(1, 10)], &[Timeslot::new(1)]),
            Some(InfeasibilityReason::NoCandidates(SessionId(1)))
        );
    }

    #[test]
    fn test_not_enough_cells() {
        let sessions = vec![Session::new(1), Session::new(2), Session::new(3)];
        assert_eq!(
            run(&sessions, &[Room::new(1, 10)], &[Timeslot::new(1), Timeslot::new(2)]),
            Some(InfeasibilityReason::NotEnoughCells { sessions: 3, cells: 2 })
        );
    }

    #[test]
    fn test_presenter_overbooked() {
        let sessions = vec![
            Session::new(1).with_presenter_id(1),
            Session::new(2).with_presenter_id(1),
        ];
        let rooms = vec![Room::new(1, 10), Room::new(2, 10)];
        assert_eq!(
            run(&sessions, &rooms, &[Timeslot::new(1)]),
            Some(InfeasibilityReason::PresenterOverbooked {
                presenter: PresenterId(1),
                sessions: 2,
                timeslots: 1,
            })
        );
    }
}
