//! Domain value types: sessions, rooms, timeslots and assignments.

use super::ids::{PresenterId, RoomId, SessionId, TimeslotId};
use std::collections::{BTreeMap, BTreeSet};

/// Preference weight used when a session states no preference for a timeslot.
pub const DEFAULT_PREFERENCE: f64 = 1.0;

/// A presenter and the timeslots they cannot attend.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Presenter {
    /// Presenter identifier.
    pub id: PresenterId,
    /// Timeslots the presenter is unavailable for.
    pub unavailable: BTreeSet<TimeslotId>,
}

impl Presenter {
    /// Creates a presenter available for every timeslot.
    pub fn new(id: impl Into<PresenterId>) -> Self {
        Self {
            id: id.into(),
            unavailable: BTreeSet::new(),
        }
    }

    /// Marks the given timeslots as unavailable.
    pub fn with_unavailable<I, T>(mut self, timeslots: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TimeslotId>,
    {
        self.unavailable.extend(timeslots.into_iter().map(Into::into));
        self
    }
}

/// A conference session to be placed into exactly one (room, timeslot).
///
/// `unavailable` is the union of the unavailability of every presenter
/// of the session; the engine consumes only this resolved set.
///
/// # Examples
///
/// ```
/// use u_confsched::entities::{Presenter, Session, TimeslotId};
///
/// let alice = Presenter::new(1).with_unavailable([2]);
/// let bob = Presenter::new(2).with_unavailable([3]);
/// let session = Session::new(10).with_presenter(&alice).with_presenter(&bob);
///
/// assert!(session.is_available(TimeslotId(1)));
/// assert!(!session.is_available(TimeslotId(2)));
/// assert!(!session.is_available(TimeslotId(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    /// Session identifier.
    pub id: SessionId,
    /// Presenters giving this session (co-presenters allowed).
    pub presenters: Vec<PresenterId>,
    /// Timeslots for which any presenter is unavailable.
    pub unavailable: BTreeSet<TimeslotId>,
    /// Minimum room capacity, if known.
    pub required_capacity: Option<i32>,
    /// Preference weight per timeslot. Missing entries weigh
    /// [`DEFAULT_PREFERENCE`].
    pub preferences: BTreeMap<TimeslotId, f64>,
}

impl Session {
    /// Creates a session with no presenters and no restrictions.
    pub fn new(id: impl Into<SessionId>) -> Self {
        Self {
            id: id.into(),
            presenters: Vec::new(),
            unavailable: BTreeSet::new(),
            required_capacity: None,
            preferences: BTreeMap::new(),
        }
    }

    /// Adds a presenter and merges their unavailability into the session.
    pub fn with_presenter(mut self, presenter: &Presenter) -> Self {
        self.push_presenter(presenter.id);
        self.unavailable.extend(presenter.unavailable.iter().copied());
        self
    }

    /// Adds a presenter by identifier only.
    pub fn with_presenter_id(mut self, id: impl Into<PresenterId>) -> Self {
        self.push_presenter(id.into());
        self
    }

    /// Marks the given timeslots as unavailable for this session.
    pub fn with_unavailable<I, T>(mut self, timeslots: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TimeslotId>,
    {
        self.unavailable.extend(timeslots.into_iter().map(Into::into));
        self
    }

    pub fn with_required_capacity(mut self, capacity: i32) -> Self {
        self.required_capacity = Some(capacity);
        self
    }

    /// Sets the preference weight for a timeslot. Higher is preferred.
    pub fn with_preference(mut self, timeslot: impl Into<TimeslotId>, weight: f64) -> Self {
        self.preferences.insert(timeslot.into(), weight);
        self
    }

    /// Whether every presenter can attend the given timeslot.
    pub fn is_available(&self, timeslot: TimeslotId) -> bool {
        !self.unavailable.contains(&timeslot)
    }

    /// Preference weight of the given timeslot.
    pub fn preference(&self, timeslot: TimeslotId) -> f64 {
        self.preferences
            .get(&timeslot)
            .copied()
            .unwrap_or(DEFAULT_PREFERENCE)
    }

    /// Whether both sessions have at least one presenter in common.
    pub fn shares_presenter(&self, other: &Session) -> bool {
        self.presenters.iter().any(|p| other.presenters.contains(p))
    }

    fn push_presenter(&mut self, id: PresenterId) {
        if !self.presenters.contains(&id) {
            self.presenters.push(id);
        }
    }
}

/// A room hosting at most one session per timeslot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Room identifier.
    pub id: RoomId,
    /// Maximum attendees. Must be non-negative.
    pub capacity: i32,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, capacity: i32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }

    /// Whether the room is large enough for the session.
    ///
    /// Sessions without a capacity requirement fit any room.
    pub fn can_host(&self, session: &Session) -> bool {
        session
            .required_capacity
            .is_none_or(|required| self.capacity >= required)
    }
}

/// A discrete scheduling unit. Otherwise opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeslot {
    /// Timeslot identifier.
    pub id: TimeslotId,
}

impl Timeslot {
    pub fn new(id: impl Into<TimeslotId>) -> Self {
        Self { id: id.into() }
    }
}

/// The binding of a session to a room and timeslot.
///
/// Created only by the result extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub session_id: SessionId,
    pub room_id: RoomId,
    pub timeslot_id: TimeslotId,
}

impl Assignment {
    pub fn new(session_id: SessionId, room_id: RoomId, timeslot_id: TimeslotId) -> Self {
        Self {
            session_id,
            room_id,
            timeslot_id,
        }
    }
}
