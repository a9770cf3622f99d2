//! Criterion benchmarks for the scheduling pipeline.
//!
//! Uses synthetic conferences: `n` sessions, presenters giving two
//! sessions each, and every presenter unavailable for one timeslot.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_confsched::builder::ModelBuilder;
use u_confsched::engine::Engine;
use u_confsched::entities::{Presenter, Room, Session, Timeslot};

// ===========================================================================
// Synthetic conference
// ===========================================================================

struct Conference {
    sessions: Vec<Session>,
    rooms: Vec<Room>,
    timeslots: Vec<Timeslot>,
}

fn conference(n_sessions: u32, n_rooms: u32, n_slots: u32) -> Conference {
    let sessions = (0..n_sessions)
        .map(|i| {
            let presenter_id = i / 2;
            let presenter = Presenter::new(presenter_id).with_unavailable([presenter_id % n_slots + 1]);
            Session::new(i + 1).with_presenter(&presenter)
        })
        .collect();
    Conference {
        sessions,
        rooms: (1..=n_rooms).map(|r| Room::new(r, 100)).collect(),
        timeslots: (1..=n_slots).map(Timeslot::new).collect(),
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &(n, rooms, slots) in &[(20, 4, 6), (60, 6, 12)] {
        let conf = conference(n, rooms, slots);
        group.bench_with_input(BenchmarkId::from_parameter(n), &conf, |b, conf| {
            b.iter(|| {
                ModelBuilder::build(
                    black_box(&conf.sessions),
                    black_box(&conf.rooms),
                    black_box(&conf.timeslots),
                )
            })
        });
    }
    group.finish();
}

fn bench_process(c: &mut Criterion) {
    let engine = Engine::new();
    let mut group = c.benchmark_group("process");
    for &(n, rooms, slots) in &[(20, 4, 6), (60, 6, 12)] {
        let conf = conference(n, rooms, slots);
        group.bench_with_input(BenchmarkId::from_parameter(n), &conf, |b, conf| {
            b.iter(|| {
                engine.process(
                    black_box(&conf.sessions),
                    black_box(&conf.rooms),
                    black_box(&conf.timeslots),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_process);
criterion_main!(benches);
