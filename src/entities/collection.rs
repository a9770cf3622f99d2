//! Convenience container for building session sets.

use super::ids::{PresenterId, TimeslotId};
use super::types::{Presenter, Session};

/// An ordered collection of sessions with a compact builder.
///
/// # Examples
///
/// ```
/// use u_confsched::entities::SessionCollection;
///
/// let mut sessions = SessionCollection::new();
/// sessions.add(1, 1, &[]);
/// sessions.add(2, 2, &[2]); // presenter 2 cannot do timeslot 2
/// assert_eq!(sessions.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionCollection {
    sessions: Vec<Session>,
}

impl SessionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-presenter session whose presenter cannot attend the
    /// listed timeslots.
    pub fn add(&mut self, session_id: u32, presenter_id: u32, unavailable: &[u32]) -> &mut Self {
        let presenter = Presenter::new(PresenterId(presenter_id))
            .with_unavailable(unavailable.iter().copied().map(TimeslotId));
        self.sessions
            .push(Session::new(session_id).with_presenter(&presenter));
        self
    }

    /// Adds a fully built session.
    pub fn push(&mut self, session: Session) -> &mut Self {
        self.sessions.push(session);
        self
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.sessions.iter()
    }

    pub fn as_slice(&self) -> &[Session] {
        &self.sessions
    }

    pub fn into_vec(self) -> Vec<Session> {
        self.sessions
    }
}

impl FromIterator<Session> for SessionCollection {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        Self {
            sessions: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[Session]> for SessionCollection {
    fn as_ref(&self) -> &[Session] {
        &self.sessions
    }
}

impl<'a> IntoIterator for &'a SessionCollection {
    type Item = &'a Session;
    type IntoIter = std::slice::Iter<'a, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}
