//! Fixed-step replay of a closed-form flight.
//!
//! [`SimulationEngine`] owns the current [`ProjectileState`] and the
//! [`TrajectoryData`] of the run. Presentation code issues `play`, `pause`
//! and `reset`, delivers scheduled ticks through [`SimulationEngine::fire`],
//! and reads snapshots back. Physics advances on a virtual clock of
//! `time_step_s` per tick, so results do not depend on real frame timing.

pub mod config;
pub mod metrics;
pub mod scheduler;
pub mod state;

use tracing::{debug, info, trace, warn};

use crate::core::kinematics::{position_at, velocity_at};
use crate::core::params::LaunchParameters;
use crate::core::results::{DerivedResults, compute_results};
use crate::core::vector::Vector2D;
use crate::error::SimError;

use self::config::EngineConfig;
use self::metrics::{FlightComparison, LiveMetrics};
use self::scheduler::{ManualScheduler, TickHandle, TickScheduler};
use self::state::{EnginePhase, EngineSnapshot, ProjectileState, TrajectoryData};

pub type StateListener = Box<dyn FnMut(&ProjectileState)>;
pub type CompletionListener = Box<dyn FnMut()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A mid-flight sample was recorded and the next tick requested.
    Advanced,
    /// The landing sample was recorded and the run completed.
    Landed,
    /// The handle was cancelled or superseded; nothing changed.
    Stale,
}

/// Parameters and bounds captured when a run starts.
#[derive(Clone, Copy, Debug)]
struct FrozenRun {
    params: LaunchParameters,
    results: DerivedResults,
}

pub struct SimulationEngine<S: TickScheduler = ManualScheduler> {
    config: EngineConfig,
    params: LaunchParameters,
    run: Option<FrozenRun>,
    state: ProjectileState,
    trajectory: TrajectoryData,
    phase: EnginePhase,
    ticks: u64,
    pending_tick: Option<TickHandle>,
    completion_notified: bool,
    scheduler: S,
    on_state_updated: Option<StateListener>,
    on_completed: Option<CompletionListener>,
}

impl<S: TickScheduler> SimulationEngine<S> {
    pub fn new(
        config: EngineConfig,
        params: LaunchParameters,
        scheduler: S,
    ) -> Result<Self, SimError> {
        config.validate()?;
        config.check_launch(&params)?;

        Ok(Self {
            config,
            params,
            run: None,
            state: ProjectileState::ZERO,
            trajectory: TrajectoryData::default(),
            phase: EnginePhase::Idle,
            ticks: 0,
            pending_tick: None,
            completion_notified: false,
            scheduler,
            on_state_updated: None,
            on_completed: None,
        })
    }

    pub fn set_on_state_updated(&mut self, listener: impl FnMut(&ProjectileState) + 'static) {
        self.on_state_updated = Some(Box::new(listener));
    }

    pub fn set_on_completed(&mut self, listener: impl FnMut() + 'static) {
        self.on_completed = Some(Box::new(listener));
    }

    /// Replaces the launch parameters.
    ///
    /// Refused while running. While paused or completed the new values are
    /// stored but the run keeps its frozen bounds until [`reset`](Self::reset).
    pub fn set_parameters(&mut self, params: LaunchParameters) -> Result<(), SimError> {
        if self.phase == EnginePhase::Running {
            warn!("launch parameters rejected: run in progress");
            return Err(SimError::RunInProgress);
        }
        if let Err(err) = self.config.check_launch(&params) {
            warn!(%err, "launch parameters rejected");
            return Err(err);
        }

        debug!(
            speed_mps = params.speed_mps(),
            angle_deg = params.angle_deg(),
            gravity_mps2 = params.gravity_mps2(),
            phase = self.phase.label(),
            "launch parameters updated"
        );
        self.params = params;
        Ok(())
    }

    pub fn play(&mut self) -> Result<(), SimError> {
        match self.phase {
            EnginePhase::Running => return Ok(()),
            EnginePhase::Completed => {
                debug!("play ignored: run already landed");
                return Ok(());
            }
            EnginePhase::Paused => {
                debug!(elapsed_s = self.state.elapsed_s, "resuming run");
            }
            EnginePhase::Idle => {
                self.config.check_launch(&self.params)?;
                let results = compute_results(&self.params);
                self.run = Some(FrozenRun {
                    params: self.params,
                    results,
                });

                if self.ticks == 0 {
                    let launch = ProjectileState {
                        position: Vector2D::ZERO,
                        velocity: Vector2D::new(
                            results.initial_velocity_x,
                            results.initial_velocity_y,
                        ),
                        elapsed_s: 0.0,
                        is_active: true,
                    };
                    self.trajectory.clear();
                    self.trajectory.push((&launch).into());
                    self.state = launch;
                }

                debug!(
                    time_of_flight_s = results.time_of_flight,
                    max_height_m = results.max_height,
                    range_m = results.horizontal_range,
                    "run started"
                );
            }
        }

        self.phase = EnginePhase::Running;
        self.request_tick();
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.phase != EnginePhase::Running {
            return;
        }
        self.cancel_pending_tick();
        self.phase = EnginePhase::Paused;
        debug!(elapsed_s = self.state.elapsed_s, "run paused");
    }

    pub fn reset(&mut self) {
        self.cancel_pending_tick();
        self.ticks = 0;
        self.state = ProjectileState::ZERO;
        self.trajectory.clear();
        self.run = None;
        self.completion_notified = false;
        self.phase = EnginePhase::Idle;
        debug!("engine reset");
    }

    /// Delivers a scheduled tick. Handles other than the one currently
    /// pending are ignored, so a tick that slipped past a pause or reset
    /// cannot touch the state.
    pub fn fire(&mut self, handle: TickHandle) -> TickOutcome {
        if self.phase != EnginePhase::Running || self.pending_tick != Some(handle) {
            trace!(tick = handle.id(), "stale tick ignored");
            return TickOutcome::Stale;
        }
        self.pending_tick = None;
        self.step()
    }

    fn step(&mut self) -> TickOutcome {
        debug_assert!(self.run.is_some(), "tick delivered without a frozen run");
        let Some(run) = self.run else {
            return TickOutcome::Stale;
        };
        let results = run.results;

        self.ticks += 1;
        let elapsed_s = self.ticks as f64 * self.config.time_step_s;
        if elapsed_s >= results.time_of_flight {
            self.land(&results);
            return TickOutcome::Landed;
        }

        let (vx, vy) = (results.initial_velocity_x, results.initial_velocity_y);
        let g = run.params.gravity_mps2();
        self.state = ProjectileState {
            position: position_at(vx, vy, g, elapsed_s),
            velocity: velocity_at(vx, vy, g, elapsed_s),
            elapsed_s,
            is_active: true,
        };
        self.trajectory.push((&self.state).into());
        trace!(
            tick = self.ticks,
            elapsed_s,
            x = self.state.position.x,
            y = self.state.position.y,
            "tick"
        );

        self.notify_state_updated();
        self.request_tick();
        TickOutcome::Advanced
    }

    fn land(&mut self, results: &DerivedResults) {
        let landing = ProjectileState {
            position: Vector2D::new(results.horizontal_range, 0.0),
            velocity: Vector2D::new(results.initial_velocity_x, results.initial_velocity_y)
                .mirrored_y(),
            elapsed_s: results.time_of_flight,
            is_active: false,
        };

        // Only the degenerate zero-length flight has a sample at or past the
        // landing time; the landing sample takes its place.
        while self
            .trajectory
            .last()
            .is_some_and(|sample| sample.elapsed_s >= landing.elapsed_s)
        {
            self.trajectory.pop();
        }
        self.trajectory.push((&landing).into());
        self.state = landing;
        self.phase = EnginePhase::Completed;

        info!(
            time_of_flight_s = results.time_of_flight,
            range_m = results.horizontal_range,
            samples = self.trajectory.len(),
            "projectile landed"
        );

        self.notify_state_updated();
        if !self.completion_notified {
            self.completion_notified = true;
            if let Some(listener) = self.on_completed.as_mut() {
                listener();
            }
        }
    }

    fn notify_state_updated(&mut self) {
        let state = self.state;
        if let Some(listener) = self.on_state_updated.as_mut() {
            listener(&state);
        }
    }

    fn request_tick(&mut self) {
        self.cancel_pending_tick();
        self.pending_tick = Some(self.scheduler.schedule_tick());
    }

    fn cancel_pending_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel_tick(handle);
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Most recently accepted parameters. These may differ from the ones the
    /// current run uses; see [`run_parameters`](Self::run_parameters).
    pub fn parameters(&self) -> &LaunchParameters {
        &self.params
    }

    pub fn run_parameters(&self) -> Option<&LaunchParameters> {
        self.run.as_ref().map(|run| &run.params)
    }

    /// Parameters that produced [`results`](Self::results): the frozen run's
    /// while one exists, otherwise the latest accepted ones.
    pub fn active_parameters(&self) -> &LaunchParameters {
        self.run_parameters().unwrap_or(&self.params)
    }

    /// Frozen bounds of the current run, or a fresh computation while idle.
    pub fn results(&self) -> DerivedResults {
        self.run
            .map_or_else(|| compute_results(&self.params), |run| run.results)
    }

    pub fn state(&self) -> &ProjectileState {
        &self.state
    }

    pub fn trajectory(&self) -> &TrajectoryData {
        &self.trajectory
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == EnginePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == EnginePhase::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.phase == EnginePhase::Completed
    }

    /// Fraction of the flight covered, in `[0, 1]`. Zero for a flight with
    /// no duration.
    pub fn progress(&self) -> f64 {
        let time_of_flight = self.results().time_of_flight;
        if time_of_flight <= 0.0 {
            return 0.0;
        }
        (self.state.elapsed_s / time_of_flight).min(1.0)
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending_tick
    }

    pub fn live_metrics(&self) -> LiveMetrics {
        LiveMetrics::from_state(&self.state, self.progress())
    }

    pub fn comparison(&self) -> Option<FlightComparison> {
        FlightComparison::from_run(&self.trajectory, &self.results())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase,
            parameters: *self.active_parameters(),
            pending_parameters: self
                .run
                .filter(|run| run.params != self.params)
                .map(|_| self.params),
            results: self.results(),
            state: self.state,
            progress: self.progress(),
            samples: self.trajectory.len(),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl SimulationEngine<ManualScheduler> {
    pub fn manual(config: EngineConfig, params: LaunchParameters) -> Result<Self, SimError> {
        Self::new(config, params, ManualScheduler::new())
    }

    /// Fires the oldest due tick, if any. One call per display frame.
    pub fn run_frame(&mut self) -> Option<TickOutcome> {
        let handle = self.scheduler.next_due()?;
        Some(self.fire(handle))
    }

    /// Drives frames until no tick is due or `max_frames` is reached.
    /// Returns the number of frames run.
    pub fn run_until_settled(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.run_frame().is_some() {
            frames += 1;
        }
        frames
    }
}
