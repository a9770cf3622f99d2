//! Scheduling pipeline: build, solve, extract.

use super::config::EngineConfig;
use crate::builder::{presolve, ModelBuilder};
use crate::entities::{Assignment, Room, Session, Timeslot};
use crate::error::{Result, ScheduleError, ValidationError};
use crate::extract::extract;
use crate::solver::{BinarySolver, BranchAndBoundSolver};
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One self-contained scheduling instance, for batch processing.
#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub sessions: Vec<Session>,
    pub rooms: Vec<Room>,
    pub timeslots: Vec<Timeslot>,
}

impl Instance {
    pub fn new(sessions: Vec<Session>, rooms: Vec<Room>, timeslots: Vec<Timeslot>) -> Self {
        Self {
            sessions,
            rooms,
            timeslots,
        }
    }
}

/// Public entry point of the scheduler.
///
/// Each call is independent: the engine keeps no state between calls,
/// so one engine can serve many threads at once.
///
/// # Examples
///
/// ```
/// use u_confsched::engine::Engine;
/// use u_confsched::entities::{Room, SessionCollection, Timeslot, TimeslotId, SessionId};
///
/// let mut sessions = SessionCollection::new();
/// sessions.add(1, 1, &[]);
/// sessions.add(2, 2, &[2]); // only available for slot 1
///
/// let rooms = vec![Room::new(1, 10)];
/// let timeslots = vec![Timeslot::new(1), Timeslot::new(2)];
///
/// let assignments = Engine::new()
///     .process(sessions.as_slice(), &rooms, &timeslots)
///     .unwrap();
/// let s2 = assignments.iter().find(|a| a.session_id == SessionId(2)).unwrap();
/// assert_eq!(s2.timeslot_id, TimeslotId(1));
/// ```
#[derive(Debug, Clone)]
pub struct Engine<S: BinarySolver = BranchAndBoundSolver> {
    solver: S,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the built-in solver and default settings.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the built-in solver.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            solver: BranchAndBoundSolver::new(),
            config,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BinarySolver> Engine<S> {
    /// Creates an engine around a custom solver back-end.
    pub fn with_solver(solver: S, config: EngineConfig) -> Self {
        Self { solver, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Assigns every session to a (room, timeslot).
    ///
    /// On success the result satisfies every schedule invariant; on
    /// failure nothing is returned. Errors propagate unchanged from the
    /// stage that raised them and are never retried.
    pub fn process(
        &self,
        sessions: &[Session],
        rooms: &[Room],
        timeslots: &[Timeslot],
    ) -> Result<Vec<Assignment>> {
        self.process_with_cancel(sessions, rooms, timeslots, None)
    }

    /// Like [`process`](Self::process), with a cancellation token.
    ///
    /// Setting the flag aborts the solver; a cancelled run reports
    /// [`SolverFailure::Cancelled`](crate::error::SolverFailure::Cancelled).
    pub fn process_with_cancel(
        &self,
        sessions: &[Session],
        rooms: &[Room],
        timeslots: &[Timeslot],
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Vec<Assignment>> {
        self.config
            .validate()
            .map_err(ValidationError::InvalidConfig)?;

        info!(
            sessions = sessions.len(),
            rooms = rooms.len(),
            timeslots = timeslots.len(),
            solver = self.solver.name(),
            "scheduling started"
        );

        let result = self.run_pipeline(sessions, rooms, timeslots, cancel.as_deref());
        match &result {
            Ok(assignments) => info!(assignments = assignments.len(), "schedule found"),
            // already reported in detail by the extractor
            Err(ScheduleError::InternalConsistency { .. }) => {}
            Err(e) => warn!(error = %e, "scheduling failed"),
        }
        result
    }

    /// Processes independent instances, in parallel if configured.
    ///
    /// Results are returned in input order.
    pub fn process_batch(&self, instances: &[Instance]) -> Vec<Result<Vec<Assignment>>> {
        let run = |inst: &Instance| self.process(&inst.sessions, &inst.rooms, &inst.timeslots);
        if self.config.parallel {
            instances.par_iter().map(run).collect()
        } else {
            instances.iter().map(run).collect()
        }
    }

    fn run_pipeline(
        &self,
        sessions: &[Session],
        rooms: &[Room],
        timeslots: &[Timeslot],
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<Assignment>> {
        let built = ModelBuilder::build(sessions, rooms, timeslots)?;

        if self.config.presolve {
            if let Some(reason) = presolve(&built, sessions, rooms, timeslots) {
                return Err(ScheduleError::Infeasible { reason });
            }
        }

        let solution = self
            .solver
            .solve(&built.model, &self.config.solver, cancel);
        debug!(
            status = ?solution.status,
            nodes = solution.nodes,
            solve_time_ms = solution.solve_time_ms,
            "solver finished"
        );

        extract(
            &solution,
            self.solver.name(),
            &built,
            sessions,
            rooms,
            timeslots,
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::extract::verify;
    use proptest::prelude::*;

    type Problem = (Vec<Session>, Vec<Room>, Vec<Timeslot>);

    /// Small random instances: up to 5 sessions, 2 rooms, 4 timeslots,
    /// 3 presenters.
    fn instance() -> impl Strategy<Value = Problem> {
        (1u32..=2, 1u32..=4)
            .prop_flat_map(|(n_rooms, n_slots)| {
                let session = (
                    prop::collection::vec(1u32..=3, 1..=2),
                    prop::collection::vec(any::<bool>(), n_slots as usize),
                );
                (
                    Just(n_rooms),
                    Just(n_slots),
                    prop::collection::vec(session, 0..=5),
                )
            })
            .prop_map(|(n_rooms, n_slots, specs)| {
                let sessions = specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (presenters, blocked))| {
                        let unavailable = blocked
                            .iter()
                            .enumerate()
                            .filter(|(_, b)| **b)
                            .map(|(t, _)| t as u32 + 1);
                        presenters.into_iter().fold(
                            Session::new(i as u32 + 1).with_unavailable(unavailable),
                            Session::with_presenter_id,
                        )
                    })
                    .collect();
                let rooms = (1..=n_rooms).map(|r| Room::new(r, 10)).collect();
                let timeslots = (1..=n_slots).map(Timeslot::new).collect();
                (sessions, rooms, timeslots)
            })
    }

    /// Tiny instances with capacities and signed preference weights,
    /// small enough to enumerate every placement.
    fn tiny_instance() -> impl Strategy<Value = Problem> {
        (1u32..=2, 1u32..=3)
            .prop_flat_map(|(n_rooms, n_slots)| {
                let session = (
                    prop::collection::vec(1u32..=3, 1..=2),
                    prop::collection::vec(any::<bool>(), n_slots as usize),
                    prop::option::of(0i32..=25),
                    prop::collection::vec(-2i32..=3, n_slots as usize),
                );
                (
                    prop::collection::vec(5i32..=30, n_rooms as usize),
                    Just(n_slots),
                    prop::collection::vec(session, 0..=4),
                )
            })
            .prop_map(|(capacities, n_slots, specs)| {
                let sessions = specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (presenters, blocked, required, weights))| {
                        let unavailable = blocked
                            .iter()
                            .enumerate()
                            .filter(|(_, b)| **b)
                            .map(|(t, _)| t as u32 + 1);
                        let mut session = presenters.into_iter().fold(
                            Session::new(i as u32 + 1).with_unavailable(unavailable),
                            Session::with_presenter_id,
                        );
                        session.required_capacity = required;
                        for (t, w) in weights.into_iter().enumerate() {
                            session = session.with_preference(t as u32 + 1, f64::from(w));
                        }
                        session
                    })
                    .collect();
                let rooms = capacities
                    .into_iter()
                    .enumerate()
                    .map(|(r, cap)| Room::new(r as u32 + 1, cap))
                    .collect();
                let timeslots = (1..=n_slots).map(Timeslot::new).collect();
                (sessions, rooms, timeslots)
            })
    }

    fn total_weight(sessions: &[Session], assignments: &[Assignment]) -> f64 {
        assignments
            .iter()
            .filter_map(|a| {
                sessions
                    .iter()
                    .find(|s| s.id == a.session_id)
                    .map(|s| s.preference(a.timeslot_id))
            })
            .sum()
    }

    /// Best total weight over every valid schedule, `None` if none exists.
    fn exhaustive_best(sessions: &[Session], rooms: &[Room], timeslots: &[Timeslot]) -> Option<f64> {
        let cells: Vec<_> = timeslots
            .iter()
            .flat_map(|t| rooms.iter().map(move |r| (r.id, t.id)))
            .collect();
        let mut choice = vec![0usize; sessions.len()];
        let mut best: Option<f64> = None;

        loop {
            let assignments: Vec<Assignment> = sessions
                .iter()
                .zip(&choice)
                .map(|(s, &c)| Assignment::new(s.id, cells[c].0, cells[c].1))
                .collect();
            if verify(&assignments, sessions, rooms, timeslots).is_empty() {
                let weight = total_weight(sessions, &assignments);
                best = Some(best.map_or(weight, |b| b.max(weight)));
            }

            let mut i = 0;
            loop {
                if i == choice.len() {
                    return best;
                }
                choice[i] += 1;
                if choice[i] < cells.len() {
                    break;
                }
                choice[i] = 0;
                i += 1;
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn success_satisfies_every_invariant((sessions, rooms, timeslots) in instance()) {
            match Engine::new().process(&sessions, &rooms, &timeslots) {
                Ok(assignments) => {
                    prop_assert_eq!(assignments.len(), sessions.len());
                    prop_assert!(verify(&assignments, &sessions, &rooms, &timeslots).is_empty());
                }
                Err(e) => prop_assert!(e.is_infeasible(), "unexpected error: {}", e),
            }
        }

        #[test]
        fn presolve_agrees_with_solver((sessions, rooms, timeslots) in instance()) {
            let with = Engine::new().process(&sessions, &rooms, &timeslots);
            let without = Engine::with_config(EngineConfig::default().with_presolve(false))
                .process(&sessions, &rooms, &timeslots);
            prop_assert_eq!(with.is_ok(), without.is_ok());
        }

        #[test]
        fn matches_exhaustive_search(
            (sessions, rooms, timeslots) in tiny_instance(),
            presolve in any::<bool>()
        ) {
            let engine = Engine::with_config(EngineConfig::default().with_presolve(presolve));
            let result = engine.process(&sessions, &rooms, &timeslots);
            match (result, exhaustive_best(&sessions, &rooms, &timeslots)) {
                (Ok(assignments), Some(best)) => {
                    prop_assert!(verify(&assignments, &sessions, &rooms, &timeslots).is_empty());
                    let weight = total_weight(&sessions, &assignments);
                    prop_assert!((weight - best).abs() < 1e-9, "weight {} vs best {}", weight, best);
                }
                (Err(e), None) => prop_assert!(e.is_infeasible(), "unexpected error: {}", e),
                (result, best) => {
                    prop_assert!(false, "engine {:?} vs exhaustive best {:?}", result, best)
                }
            }
        }

        #[test]
        fn reruns_stay_valid((sessions, rooms, timeslots) in instance()) {
            let engine = Engine::new();
            let first = engine.process(&sessions, &rooms, &timeslots);
            let second = engine.process(&sessions, &rooms, &timeslots);
            prop_assert_eq!(first.is_ok(), second.is_ok());
            if let Ok(assignments) = second {
                prop_assert!(verify(&assignments, &sessions, &rooms, &timeslots).is_empty());
            }
        }
    }
}
