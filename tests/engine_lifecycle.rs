//! Lifecycle tests for the stepped engine: play/pause/reset transitions,
//! tick cancellation, landing clamp, and notification counts.

use std::cell::Cell;
use std::rc::Rc;

use parabolic_sim::{
    EngineConfig, EnginePhase, LaunchParameters, ProjectileState, SimError, SimulationEngine,
    TickOutcome, Vector2D, compute_results,
};

const G: f64 = 9.8;
const MAX_FRAMES: usize = 100_000;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "actual={actual}, expected={expected}, tolerance={tolerance}"
    );
}

fn engine_with(config: EngineConfig, speed: f64, angle: f64) -> SimulationEngine {
    let params = LaunchParameters::new(speed, angle, G).expect("valid parameters");
    SimulationEngine::manual(config, params).expect("valid engine")
}

fn engine(speed: f64, angle: f64) -> SimulationEngine {
    engine_with(EngineConfig::default(), speed, angle)
}

fn run_to_landing(engine: &mut SimulationEngine) {
    engine.play().expect("play");
    engine.run_until_settled(MAX_FRAMES);
    assert_eq!(engine.phase(), EnginePhase::Completed);
}

#[test]
fn scenario_forty_five_degrees() {
    let mut e = engine(20.0, 45.0);
    let r = e.results();
    assert_close(r.initial_velocity_x, 14.142, 1e-3);
    assert_close(r.initial_velocity_y, 14.142, 1e-3);
    assert_close(r.time_of_flight, 2.886, 1e-3);
    assert_close(r.max_height, 10.204, 1e-3);
    assert_close(r.horizontal_range, 40.816, 1e-3);

    run_to_landing(&mut e);
    assert_eq!(e.state().elapsed_s, r.time_of_flight);
    assert_eq!(e.state().position, Vector2D::new(r.horizontal_range, 0.0));
}

#[test]
fn scenario_near_vertical_after_clamp() {
    let config = EngineConfig::default();
    let mut e = engine_with(config, 10.0, config.clamp_angle(90.0));
    assert_eq!(e.parameters().angle_deg(), 85.0);

    let r = e.results();
    assert_close(r.initial_velocity_x, 0.872, 1e-3);
    assert_close(r.initial_velocity_y, 9.962, 1e-3);
    assert!(r.max_height > 2.0 * r.horizontal_range);

    run_to_landing(&mut e);
}

#[test]
fn scenario_near_horizontal() {
    let r = engine(20.0, 5.0).results();
    assert!(r.time_of_flight < 0.4);
    assert!(r.max_height < 0.2);
    assert_close(r.horizontal_range, 19.924 * r.time_of_flight, 1e-3);
}

#[test]
fn pause_and_resume_matches_uninterrupted_run() {
    let mut straight = engine(20.0, 45.0);
    run_to_landing(&mut straight);

    let mut interrupted = engine(20.0, 45.0);
    interrupted.play().expect("play");
    while interrupted.state().elapsed_s < 1.0 {
        assert_eq!(interrupted.run_frame(), Some(TickOutcome::Advanced));
    }

    interrupted.pause();
    assert!(interrupted.is_paused());
    let frozen = *interrupted.state();
    let frozen_len = interrupted.trajectory().len();

    // Frames keep coming while paused but nothing is due.
    for _ in 0..10 {
        assert_eq!(interrupted.run_frame(), None);
    }
    assert_eq!(*interrupted.state(), frozen);
    assert_eq!(interrupted.trajectory().len(), frozen_len);

    interrupted.play().expect("resume");
    assert_eq!(interrupted.trajectory().len(), frozen_len);
    interrupted.run_until_settled(MAX_FRAMES);

    assert!(interrupted.is_completed());
    assert_eq!(interrupted.state().elapsed_s, straight.state().elapsed_s);
    assert_eq!(interrupted.trajectory(), straight.trajectory());
}

#[test]
fn play_twice_equals_play_once() {
    let mut once = engine(20.0, 45.0);
    once.play().expect("play");

    let mut twice = engine(20.0, 45.0);
    twice.play().expect("play");
    twice.play().expect("second play is a no-op");

    assert_eq!(twice.scheduler().pending(), 1);
    assert_eq!(twice.state(), once.state());
    assert_eq!(twice.trajectory(), once.trajectory());
    assert_eq!(twice.phase(), once.phase());
}

#[test]
fn reset_returns_to_zero_from_every_phase() {
    let mut e = engine(20.0, 45.0);

    e.reset();
    assert_eq!(*e.state(), ProjectileState::ZERO);

    e.play().expect("play");
    e.run_frame();
    e.reset();
    assert_eq!(e.phase(), EnginePhase::Idle);
    assert_eq!(*e.state(), ProjectileState::ZERO);
    assert!(e.trajectory().is_empty());
    assert_eq!(e.scheduler().pending(), 0);

    e.play().expect("play");
    e.run_frame();
    e.pause();
    e.reset();
    assert_eq!(*e.state(), ProjectileState::ZERO);
    assert!(e.trajectory().is_empty());

    run_to_landing(&mut e);
    e.reset();
    assert_eq!(*e.state(), ProjectileState::ZERO);
    assert!(e.trajectory().is_empty());
    assert_eq!(e.progress(), 0.0);
}

#[test]
fn cancelled_tick_cannot_mutate_state() {
    let mut e = engine(20.0, 45.0);
    e.play().expect("play");
    e.run_frame();

    let handle = e.pending_tick().expect("tick scheduled");
    e.pause();
    assert_eq!(e.scheduler().pending(), 0);
    let before = *e.state();
    assert_eq!(e.fire(handle), TickOutcome::Stale);
    assert_eq!(*e.state(), before);

    // Still stale after resuming: the resume scheduled a fresh handle.
    e.play().expect("resume");
    assert_eq!(e.fire(handle), TickOutcome::Stale);
    assert_eq!(*e.state(), before);

    let handle = e.pending_tick().expect("tick scheduled");
    e.reset();
    assert_eq!(e.fire(handle), TickOutcome::Stale);
    assert_eq!(*e.state(), ProjectileState::ZERO);
    assert!(e.trajectory().is_empty());
}

#[test]
fn trajectory_times_strictly_increase_and_end_on_landing() {
    let mut e = engine(27.0, 38.0);
    run_to_landing(&mut e);

    let times = e.trajectory().times();
    let dt = e.config().time_step_s;
    assert_eq!(times[0], 0.0);
    for pair in times.windows(2) {
        assert!(pair[1] > pair[0], "times must increase: {pair:?}");
        assert!(pair[1] - pair[0] <= dt + 1e-12);
    }

    let last = e.trajectory().last().expect("landing sample");
    let r = e.results();
    assert_eq!(last.elapsed_s, r.time_of_flight);
    assert_eq!(last.position.y, 0.0);
    assert_eq!(last.velocity, Vector2D::new(r.initial_velocity_x, -r.initial_velocity_y));
    assert!(e.trajectory().positions().iter().all(|p| p.y >= 0.0));
}

#[test]
fn tick_landing_exactly_on_flight_time_is_not_duplicated() {
    // vy = 4.9 m/s under g = 9.8 gives a flight of exactly 1 s = 4 ticks.
    let config = EngineConfig {
        time_step_s: 0.25,
        min_angle_deg: 0.0,
        max_angle_deg: 90.0,
    };
    let mut e = engine_with(config, 4.9, 90.0);
    assert_eq!(e.results().time_of_flight, 1.0);

    e.play().expect("play");
    let outcomes: Vec<_> = std::iter::from_fn(|| e.run_frame()).collect();
    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Advanced,
            TickOutcome::Advanced,
            TickOutcome::Advanced,
            TickOutcome::Landed
        ]
    );
    assert_eq!(e.trajectory().times(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn degenerate_flight_completes_on_first_tick() {
    let mut e = engine(0.0, 45.0);
    assert_eq!(e.results().time_of_flight, 0.0);

    e.play().expect("play");
    assert_eq!(e.progress(), 0.0);
    assert_eq!(e.run_frame(), Some(TickOutcome::Landed));

    assert!(e.is_completed());
    assert_eq!(e.progress(), 0.0);
    assert_eq!(e.trajectory().len(), 1);
    assert_eq!(e.state().elapsed_s, 0.0);
    assert!(!e.state().is_active);
    assert!(e.state().position.x.is_finite() && e.state().position.y.is_finite());
}

#[test]
fn notifications_fire_per_tick_and_once_on_landing() {
    let mut e = engine(15.0, 60.0);
    let updates = Rc::new(Cell::new(0usize));
    let completions = Rc::new(Cell::new(0usize));
    let last_active = Rc::new(Cell::new(true));

    let (u, a) = (Rc::clone(&updates), Rc::clone(&last_active));
    e.set_on_state_updated(move |state| {
        u.set(u.get() + 1);
        a.set(state.is_active);
    });
    let c = Rc::clone(&completions);
    e.set_on_completed(move || c.set(c.get() + 1));

    run_to_landing(&mut e);
    assert_eq!(updates.get(), e.trajectory().len() - 1);
    assert_eq!(completions.get(), 1);
    assert!(!last_active.get());

    e.play().expect("play after landing is a no-op");
    assert_eq!(e.run_frame(), None);
    assert_eq!(completions.get(), 1);

    e.reset();
    run_to_landing(&mut e);
    assert_eq!(completions.get(), 2);
}

#[test]
fn results_stay_frozen_until_reset() {
    let mut e = engine(20.0, 45.0);
    let original = e.results();
    e.play().expect("play");
    e.run_frame();

    let steeper = LaunchParameters::new(25.0, 70.0, G).expect("valid parameters");
    assert!(matches!(e.set_parameters(steeper), Err(SimError::RunInProgress)));

    e.pause();
    e.set_parameters(steeper).expect("accepted while paused");
    assert_eq!(e.results(), original);
    assert_eq!(e.run_parameters().map(|p| p.speed_mps()), Some(20.0));
    assert_eq!(e.parameters().speed_mps(), 25.0);

    e.play().expect("resume");
    e.run_until_settled(MAX_FRAMES);
    assert_eq!(e.state().elapsed_s, original.time_of_flight);

    e.reset();
    assert_ne!(e.results(), original);
    assert_eq!(e.results().initial_velocity_y, 25.0 * 70f64.to_radians().sin());
}

#[test]
fn progress_tracks_elapsed_fraction() {
    let mut e = engine(20.0, 45.0);
    e.play().expect("play");
    let mut last = 0.0;
    while let Some(outcome) = e.run_frame() {
        let p = e.progress();
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= last);
        last = p;
        if outcome == TickOutcome::Advanced {
            assert_close(p, e.state().elapsed_s / e.results().time_of_flight, 1e-12);
        }
    }
    assert_eq!(last, 1.0);
}

#[test]
fn snapshot_reflects_engine() {
    let mut e = engine(20.0, 45.0);
    e.play().expect("play");
    e.run_frame();
    let snap = e.snapshot();
    assert_eq!(snap.phase, EnginePhase::Running);
    assert_eq!(snap.samples, 2);
    assert_eq!(snap.state, *e.state());

    let json = serde_json::to_value(&snap).expect("snapshot serializes");
    assert_eq!(json["phase"], "running");
    assert_eq!(json["samples"], 2);
}

#[test]
fn comparison_after_landing_is_close_to_closed_form() {
    let mut e = engine(20.0, 45.0);
    run_to_landing(&mut e);
    let cmp = e.comparison().expect("completed run");

    assert_eq!(cmp.range_error_m, 0.0);
    assert_eq!(cmp.sampled_flight_time_s, cmp.analytic_flight_time_s);
    assert!(cmp.peak_error_m < 0.01, "peak error {}", cmp.peak_error_m);
    assert_close(cmp.launch_speed_mps, 20.0, 1e-9);
    assert_close(cmp.landing_speed_mps, 20.0, 1e-9);
}

#[test]
fn snapshot_pairs_results_with_their_own_parameters() {
    let mut e = engine(20.0, 45.0);
    e.play().expect("play");
    e.run_frame();
    e.pause();

    let steeper = LaunchParameters::new(25.0, 70.0, G).expect("valid parameters");
    e.set_parameters(steeper).expect("accepted while paused");

    let snap = e.snapshot();
    assert_eq!(compute_results(&snap.parameters), snap.results);
    assert_eq!(snap.parameters.speed_mps(), 20.0);
    assert_eq!(snap.pending_parameters, Some(steeper));
    assert_eq!(*e.active_parameters(), snap.parameters);

    let json = serde_json::to_value(&snap).expect("snapshot serializes");
    assert_eq!(json["parameters"]["angle_deg"], 45.0);
    assert_eq!(json["pending_parameters"]["angle_deg"], 70.0);

    e.reset();
    let snap = e.snapshot();
    assert_eq!(snap.parameters, steeper);
    assert_eq!(snap.pending_parameters, None);
    assert_eq!(compute_results(&snap.parameters), snap.results);
}
