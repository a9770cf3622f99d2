//! Read-only view of a finished schedule, for display.

use crate::entities::{Assignment, RoomId, SessionId, TimeslotId};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A schedule grid keyed by (room, timeslot).
///
/// Consumes the engine's output purely for presentation; it imposes no
/// constraints back on scheduling.
///
/// # Examples
///
/// ```
/// use u_confsched::entities::Assignment;
/// use u_confsched::schedule::Schedule;
///
/// let schedule = Schedule::new(vec![
///     Assignment::new(1.into(), 1.into(), 1.into()),
///     Assignment::new(2.into(), 1.into(), 2.into()),
/// ]);
/// assert_eq!(schedule.at(1.into(), 2.into()), Some(2.into()));
/// println!("{schedule}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    assignments: Vec<Assignment>,
    grid: BTreeMap<(RoomId, TimeslotId), SessionId>,
}

impl Schedule {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        let grid = assignments
            .iter()
            .map(|a| ((a.room_id, a.timeslot_id), a.session_id))
            .collect();
        Self { assignments, grid }
    }

    /// Session held in the room at the timeslot, if any.
    pub fn at(&self, room: RoomId, timeslot: TimeslotId) -> Option<SessionId> {
        self.grid.get(&(room, timeslot)).copied()
    }

    /// Assignment of the given session, if scheduled.
    pub fn for_session(&self, session: SessionId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.session_id == session)
    }

    /// Rooms used by the schedule, ascending.
    pub fn rooms(&self) -> BTreeSet<RoomId> {
        self.assignments.iter().map(|a| a.room_id).collect()
    }

    /// Timeslots used by the schedule, ascending.
    pub fn timeslots(&self) -> BTreeSet<TimeslotId> {
        self.assignments.iter().map(|a| a.timeslot_id).collect()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl From<Vec<Assignment>> for Schedule {
    fn from(assignments: Vec<Assignment>) -> Self {
        Self::new(assignments)
    }
}

impl fmt::Display for Schedule {
    /// Rooms as rows, timeslots as columns, session ids in the cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeslots = self.timeslots();

        write!(f, "R\\T\t|\t")?;
        for t in &timeslots {
            write!(f, "{t}\t")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(75))?;

        for room in self.rooms() {
            write!(f, "{room}\t|\t")?;
            for &t in &timeslots {
                match self.at(room, t) {
                    Some(session) => write!(f, "{session}\t")?,
                    None => write!(f, "\t")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
