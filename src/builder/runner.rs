//! Translation of a scheduling instance into a [`BinaryModel`].

use super::index::{ExclusionTable, VariableIndex};
use crate::entities::{Assignment, Room, Session, Timeslot};
use crate::error::{Result, ValidationError};
use crate::model::{BinaryModel, BinaryVar, Objective, VarId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A model together with the lookups needed to read its solution back.
#[derive(Debug, Clone)]
pub struct BuiltModel {
    /// The optimization model handed to the solver.
    pub model: BinaryModel,
    /// Variable <-> (session, room, timeslot) mapping.
    pub index: VariableIndex,
    /// Flat availability lookups.
    pub exclusions: ExclusionTable,
}

/// Builds the assignment model for a scheduling instance.
///
/// # Model
///
/// - one binary variable per *feasible* (session, room, timeslot) triple;
///   triples blocked by presenter availability or room capacity are never
///   created
/// - **coverage**: each session's variables sum to exactly 1
/// - **exclusivity**: each (room, timeslot) cell holds at most 1 session
/// - **presenter non-overlap**: per presenter and timeslot, at most 1 of
///   their sessions across all rooms
/// - objective: maximize the sum of session/timeslot preference weights
///   (uniform weight 1 when no preferences are given)
///
/// Variables and rows are created in input order, so the same instance
/// always yields the same model.
///
/// # Examples
///
/// ```
/// use u_confsched::builder::ModelBuilder;
/// use u_confsched::entities::{Room, Session, Timeslot};
///
/// let sessions = vec![Session::new(1).with_unavailable([2]), Session::new(2)];
/// let rooms = vec![Room::new(1, 10)];
/// let timeslots = vec![Timeslot::new(1), Timeslot::new(2)];
///
/// let built = ModelBuilder::build(&sessions, &rooms, &timeslots).unwrap();
/// assert_eq!(built.model.var_count(), 3); // session 1 cannot use slot 2
/// ```
pub struct ModelBuilder;

impl ModelBuilder {
    /// Validates the instance and builds its model.
    pub fn build(sessions: &[Session], rooms: &[Room], timeslots: &[Timeslot]) -> Result<BuiltModel> {
        validate_instance(sessions, rooms, timeslots)?;

        let exclusions = ExclusionTable::from_sessions(sessions);
        let mut model = BinaryModel::new("conference-schedule");
        let mut index = VariableIndex::new();
        let mut weights = Vec::new();

        let cells = rooms.len() * timeslots.len();
        let mut cell_vars: Vec<Vec<VarId>> = vec![Vec::new(); cells];
        // (session position, timeslot position) -> variables across rooms
        let mut slot_vars: HashMap<(usize, usize), Vec<VarId>> = HashMap::new();

        for (si, session) in sessions.iter().enumerate() {
            let mut cover = Vec::new();
            for (ti, slot) in timeslots.iter().enumerate() {
                if exclusions.is_forbidden(session.id, slot.id) {
                    continue;
                }
                for (ri, room) in rooms.iter().enumerate() {
                    if !room.can_host(session) {
                        continue;
                    }
                    let var = model.add_var(BinaryVar::new(format!(
                        "s{}_r{}_t{}",
                        session.id, room.id, slot.id
                    )));
                    index.insert(var, Assignment::new(session.id, room.id, slot.id));
                    weights.push(session.preference(slot.id));

                    cover.push(var);
                    cell_vars[ti * rooms.len() + ri].push(var);
                    slot_vars.entry((si, ti)).or_default().push(var);
                }
            }
            if cover.is_empty() {
                debug!(session = %session.id, "session has no candidate placement");
            }
            model.add_exactly_one(format!("cover_s{}", session.id), cover);
        }

        for (ti, slot) in timeslots.iter().enumerate() {
            for (ri, room) in rooms.iter().enumerate() {
                let vars = &cell_vars[ti * rooms.len() + ri];
                if vars.len() >= 2 {
                    model.add_at_most_one(format!("cell_r{}_t{}", room.id, slot.id), vars.clone());
                }
            }
        }

        let position: HashMap<_, _> = sessions
            .iter()
            .enumerate()
            .map(|(si, s)| (s.id, si))
            .collect();

        for (presenter, presenter_sessions) in exclusions.presenters() {
            if presenter_sessions.len() < 2 {
                continue;
            }
            for (ti, slot) in timeslots.iter().enumerate() {
                let mut terms = Vec::new();
                let mut touched = 0usize;
                for sid in presenter_sessions {
                    let Some(&si) = position.get(sid) else {
                        continue;
                    };
                    if let Some(vars) = slot_vars.get(&(si, ti)) {
                        terms.extend_from_slice(vars);
                        touched += 1;
                    }
                }
                if touched >= 2 {
                    model.add_at_most_one(format!("presenter_p{}_t{}", presenter, slot.id), terms);
                }
            }
        }

        model.set_objective(Objective::Maximize { weights });

        debug!(
            sessions = sessions.len(),
            rooms = rooms.len(),
            timeslots = timeslots.len(),
            variables = model.var_count(),
            constraints = model.constraint_count(),
            "model built"
        );

        Ok(BuiltModel {
            model,
            index,
            exclusions,
        })
    }
}

/// Structural checks performed before any model is built.
pub fn validate_instance(
    sessions: &[Session],
    rooms: &[Room],
    timeslots: &[Timeslot],
) -> std::result::Result<(), ValidationError> {
    if rooms.is_empty() {
        return Err(ValidationError::NoRooms);
    }
    if timeslots.is_empty() {
        return Err(ValidationError::NoTimeslots);
    }

    let mut seen = HashSet::new();
    for room in rooms {
        if !seen.insert(room.id) {
            return Err(ValidationError::DuplicateRoom(room.id));
        }
        if room.capacity < 0 {
            return Err(ValidationError::NegativeCapacity {
                room: room.id,
                capacity: room.capacity,
            });
        }
    }

    let mut seen = HashSet::new();
    for slot in timeslots {
        if !seen.insert(slot.id) {
            return Err(ValidationError::DuplicateTimeslot(slot.id));
        }
    }

    let mut seen = HashSet::new();
    for session in sessions {
        if !seen.insert(session.id) {
            return Err(ValidationError::DuplicateSession(session.id));
        }
        if let Some(capacity) = session.required_capacity.filter(|&c| c < 0) {
            return Err(ValidationError::NegativeRequirement {
                session: session.id,
                capacity,
            });
        }
        if let Some((&timeslot, &weight)) =
            session.preferences.iter().find(|(_, w)| !w.is_finite())
        {
            return Err(ValidationError::InvalidPreference {
                session: session.id,
                timeslot,
                weight,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RoomId, SessionId, TimeslotId};
    use crate::error::ScheduleError;
    use crate::model::Sense;

    fn rooms(n: u32) -> Vec<Room> {
        (1..=n).map(|i| Room::new(i, 10)).collect()
    }

    fn slots(n: u32) -> Vec<Timeslot> {
        (1..=n).map(Timeslot::new).collect()
    }

    fn validation_of(result: Result<BuiltModel>) -> ValidationError {
        match result {
            Err(ScheduleError::Validation(v)) => v,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_dense_instance_sizes() {
        let sessions: Vec<Session> = (1..=3).map(Session::new).collect();
        let built = ModelBuilder::build(&sessions, &rooms(2), &slots(2)).unwrap();

        // 3 sessions x 2 rooms x 2 slots
        assert_eq!(built.model.var_count(), 12);
        // 3 coverage + 4 cells, no shared presenters
        assert_eq!(built.model.constraint_count(), 7);
        assert!(built.model.validate().is_ok());
        assert_eq!(built.index.len(), 12);
    }

    #[test]
    fn test_unavailable_triples_are_absent() {
        let sessions = vec![Session::new(1).with_unavailable([2])];
        let built = ModelBuilder::build(&sessions, &rooms(2), &slots(2)).unwrap();

        assert_eq!(built.model.var_count(), 2);
        for (_, triple) in built.index.iter() {
            assert_eq!(triple.timeslot_id, TimeslotId(1));
        }
        assert!(built
            .index
            .var_of(&Assignment::new(SessionId(1), RoomId(1), TimeslotId(2)))
            .is_none());
    }

    #[test]
    fn test_capacity_prunes_rooms() {
        let sessions = vec![Session::new(1).with_required_capacity(50)];
        let rooms = vec![Room::new(1, 10), Room::new(2, 100)];
        let built = ModelBuilder::build(&sessions, &rooms, &slots(3)).unwrap();

        assert_eq!(built.model.var_count(), 3);
        assert!(built.index.iter().all(|(_, t)| t.room_id == RoomId(2)));
    }

    #[test]
    fn test_presenter_rows() {
        let sessions = vec![
            Session::new(1).with_presenter_id(7),
            Session::new(2).with_presenter_id(7),
            Session::new(3).with_presenter_id(8),
        ];
        let built = ModelBuilder::build(&sessions, &rooms(2), &slots(2)).unwrap();

        let presenter_rows: Vec<_> = built
            .model
            .constraints
            .iter()
            .filter(|c| c.name.starts_with("presenter_"))
            .collect();
        // presenter 7 in each of the 2 slots; presenter 8 gives one session only
        assert_eq!(presenter_rows.len(), 2);
        for row in presenter_rows {
            assert_eq!(row.sense, Sense::AtMost);
            assert_eq!(row.rhs, 1);
            // 2 sessions x 2 rooms
            assert_eq!(row.terms.len(), 4);
        }
    }

    #[test]
    fn test_empty_candidate_session_keeps_coverage_row() {
        let sessions = vec![Session::new(1).with_unavailable([1])];
        let built = ModelBuilder::build(&sessions, &rooms(1), &slots(1)).unwrap();

        assert_eq!(built.model.var_count(), 0);
        let cover = &built.model.constraints[0];
        assert_eq!(cover.sense, Sense::Equal);
        assert!(cover.terms.is_empty());
    }

    #[test]
    fn test_preference_weights() {
        let sessions = vec![Session::new(1).with_preference(2, 5.0)];
        let built = ModelBuilder::build(&sessions, &rooms(1), &slots(2)).unwrap();

        match &built.model.objective {
            Objective::Maximize { weights } => assert_eq!(weights, &vec![1.0, 5.0]),
            other => panic!("unexpected objective {other:?}"),
        }
    }

    #[test]
    fn test_empty_rooms_or_timeslots() {
        let sessions = vec![Session::new(1)];
        assert_eq!(
            validation_of(ModelBuilder::build(&sessions, &[], &slots(1))),
            ValidationError::NoRooms
        );
        assert_eq!(
            validation_of(ModelBuilder::build(&sessions, &rooms(1), &[])),
            ValidationError::NoTimeslots
        );
    }

    #[test]
    fn test_duplicate_ids() {
        let dup_sessions = vec![Session::new(1), Session::new(1)];
        assert_eq!(
            validation_of(ModelBuilder::build(&dup_sessions, &rooms(1), &slots(2))),
            ValidationError::DuplicateSession(SessionId(1))
        );

        let dup_rooms = vec![Room::new(1, 5), Room::new(1, 6)];
        assert_eq!(
            validation_of(ModelBuilder::build(&[], &dup_rooms, &slots(1))),
            ValidationError::DuplicateRoom(RoomId(1))
        );

        let dup_slots = vec![Timeslot::new(3), Timeslot::new(3)];
        assert_eq!(
            validation_of(ModelBuilder::build(&[], &rooms(1), &dup_slots)),
            ValidationError::DuplicateTimeslot(TimeslotId(3))
        );
    }

    #[test]
    fn test_negative_capacities() {
        let bad_room = vec![Room::new(1, -1)];
        assert!(matches!(
            validation_of(ModelBuilder::build(&[], &bad_room, &slots(1))),
            ValidationError::NegativeCapacity { capacity: -1, .. }
        ));

        let bad_session = vec![Session::new(1).with_required_capacity(-3)];
        assert!(matches!(
            validation_of(ModelBuilder::build(&bad_session, &rooms(1), &slots(1))),
            ValidationError::NegativeRequirement { capacity: -3, .. }
        ));
    }

    #[test]
    fn test_non_finite_preference() {
        let sessions = vec![Session::new(1).with_preference(1, f64::INFINITY)];
        assert!(matches!(
            validation_of(ModelBuilder::build(&sessions, &rooms(1), &slots(1))),
            ValidationError::InvalidPreference { .. }
        ));
    }

    #[test]
    fn test_deterministic() {
        let sessions = vec![
            Session::new(1).with_presenter_id(1),
            Session::new(2).with_presenter_id(1).with_unavailable([1]),
        ];
        let a = ModelBuilder::build(&sessions, &rooms(2), &slots(3)).unwrap();
        let b = ModelBuilder::build(&sessions, &rooms(2), &slots(3)).unwrap();

        let names = |m: &BuiltModel| m.model.vars.iter().map(|v| v.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.model.constraint_count(), b.model.constraint_count());
    }
}
