//! Lookup tables produced alongside the model.

use crate::entities::{Assignment, PresenterId, Session, SessionId, TimeslotId};
use crate::model::VarId;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Bidirectional map between model variables and the (session, room,
/// timeslot) triples they stand for.
///
/// Only feasible triples get a variable; a triple absent from the index
/// was excluded by availability or capacity.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    triples: Vec<Assignment>,
    lookup: HashMap<Assignment, VarId>,
    by_session: HashMap<SessionId, Vec<VarId>>,
}

impl VariableIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the triple under the next variable id.
    ///
    /// `var` must be the id the model handed out for this triple.
    pub(crate) fn insert(&mut self, var: VarId, triple: Assignment) {
        debug_assert_eq!(var.index(), self.triples.len());
        self.triples.push(triple);
        self.lookup.insert(triple, var);
        self.by_session
            .entry(triple.session_id)
            .or_default()
            .push(var);
    }

    /// Triple represented by `var`.
    pub fn get(&self, var: VarId) -> Option<&Assignment> {
        self.triples.get(var.index())
    }

    /// Variable representing the triple, if it is in the model.
    pub fn var_of(&self, triple: &Assignment) -> Option<VarId> {
        self.lookup.get(triple).copied()
    }

    /// All candidate variables for a session, in creation order.
    pub fn candidates_of(&self, session: SessionId) -> &[VarId] {
        self.by_session
            .get(&session)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Assignment)> {
        self.triples
            .iter()
            .enumerate()
            .map(|(i, triple)| (VarId(i), triple))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Flat availability lookups built once per run.
///
/// Replaces presenter-to-session back-references with two tables:
/// the forbidden (session, timeslot) pairs and the sessions each
/// presenter gives.
#[derive(Debug, Clone, Default)]
pub struct ExclusionTable {
    forbidden: HashSet<(SessionId, TimeslotId)>,
    presenter_sessions: BTreeMap<PresenterId, Vec<SessionId>>,
}

impl ExclusionTable {
    /// Builds the table from the session set.
    pub fn from_sessions(sessions: &[Session]) -> Self {
        let mut table = Self::default();
        for session in sessions {
            for &timeslot in &session.unavailable {
                table.forbidden.insert((session.id, timeslot));
            }
            for &presenter in &session.presenters {
                let listed = table.presenter_sessions.entry(presenter).or_default();
                // a presenter repeated on one session still gives it once
                if listed.last() != Some(&session.id) {
                    listed.push(session.id);
                }
            }
        }
        table
    }

    /// Whether the session may not be placed in the timeslot.
    pub fn is_forbidden(&self, session: SessionId, timeslot: TimeslotId) -> bool {
        self.forbidden.contains(&(session, timeslot))
    }

    /// Sessions given by the presenter, in input order.
    pub fn sessions_of(&self, presenter: PresenterId) -> &[SessionId] {
        self.presenter_sessions
            .get(&presenter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Presenters in ascending id order with their sessions.
    pub fn presenters(&self) -> impl Iterator<Item = (PresenterId, &[SessionId])> {
        self.presenter_sessions
            .iter()
            .map(|(&p, sessions)| (p, sessions.as_slice()))
    }
}
