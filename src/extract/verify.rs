//! Independent re-verification of a schedule.

use crate::entities::{Assignment, Room, Session, SessionId, Timeslot, TimeslotId};
use crate::error::Violation;
use std::collections::{HashMap, HashSet};

/// Checks every schedule invariant and returns all violations found.
///
/// The check uses only the entities, never the model, so a defect in the
/// model encoding cannot hide here:
///
/// 1. every session assigned exactly once
/// 2. no two assignments share a (room, timeslot)
/// 3. no session placed where a presenter is unavailable
/// 4. no presenter in two sessions at the same timeslot
/// 5. room capacity covers the session requirement
///
/// Assignments naming unknown sessions, rooms, or timeslots are reported
/// too. An empty result means the schedule is valid.
///
/// # Examples
///
/// ```
/// use u_confsched::entities::{Assignment, Room, Session, Timeslot};
/// use u_confsched::extract::verify;
///
/// let sessions = vec![Session::new(1)];
/// let rooms = vec![Room::new(1, 10)];
/// let timeslots = vec![Timeslot::new(1)];
/// let schedule = vec![Assignment::new(1.into(), 1.into(), 1.into())];
///
/// assert!(verify(&schedule, &sessions, &rooms, &timeslots).is_empty());
/// ```
pub fn verify(
    assignments: &[Assignment],
    sessions: &[Session],
    rooms: &[Room],
    timeslots: &[Timeslot],
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let session_by_id: HashMap<SessionId, &Session> =
        sessions.iter().map(|s| (s.id, s)).collect();
    let room_by_id: HashMap<_, _> = rooms.iter().map(|r| (r.id, r)).collect();
    let known_slots: HashSet<TimeslotId> = timeslots.iter().map(|t| t.id).collect();

    let mut counts: HashMap<SessionId, usize> = HashMap::new();
    let mut cells = HashMap::new();
    let mut presenter_slots = HashMap::new();

    for a in assignments {
        let Some(session) = session_by_id.get(&a.session_id) else {
            violations.push(Violation::UnknownEntity {
                kind: "session",
                id: a.session_id.get(),
            });
            continue;
        };
        *counts.entry(a.session_id).or_default() += 1;

        match room_by_id.get(&a.room_id) {
            Some(room) => {
                if let Some(required) = session.required_capacity {
                    if room.capacity < required {
                        violations.push(Violation::CapacityExceeded {
                            session: a.session_id,
                            room: a.room_id,
                            required,
                            capacity: room.capacity,
                        });
                    }
                }
            }
            None => violations.push(Violation::UnknownEntity {
                kind: "room",
                id: a.room_id.get(),
            }),
        }

        if !known_slots.contains(&a.timeslot_id) {
            violations.push(Violation::UnknownEntity {
                kind: "timeslot",
                id: a.timeslot_id.get(),
            });
        }

        if !session.is_available(a.timeslot_id) {
            violations.push(Violation::Unavailable {
                session: a.session_id,
                timeslot: a.timeslot_id,
            });
        }

        if let Some(first) = cells.insert((a.room_id, a.timeslot_id), a.session_id) {
            violations.push(Violation::RoomConflict {
                room: a.room_id,
                timeslot: a.timeslot_id,
                first,
                second: a.session_id,
            });
        }

        for &presenter in &session.presenters {
            if let Some(first) = presenter_slots.insert((presenter, a.timeslot_id), a.session_id) {
                if first != a.session_id {
                    violations.push(Violation::PresenterConflict {
                        presenter,
                        timeslot: a.timeslot_id,
                        first,
                        second: a.session_id,
                    });
                }
            }
        }
    }

    for session in sessions {
        match counts.get(&session.id).copied().unwrap_or(0) {
            0 => violations.push(Violation::Unassigned(session.id)),
            1 => {}
            count => violations.push(Violation::AssignedMultipleTimes {
                session: session.id,
                count,
            }),
        }
    }

    violations
}
