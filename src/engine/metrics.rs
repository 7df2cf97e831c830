use serde::Serialize;

use crate::core::kinematics::speed_at;
use crate::core::results::DerivedResults;
use crate::engine::state::{ProjectileState, TrajectoryData};

/// Readouts for the current sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LiveMetrics {
    pub elapsed_s: f64,
    pub height_m: f64,
    pub distance_m: f64,
    pub speed_mps: f64,
    pub progress: f64,
}

impl LiveMetrics {
    pub fn from_state(state: &ProjectileState, progress: f64) -> Self {
        Self {
            elapsed_s: state.elapsed_s,
            height_m: state.position.y.max(0.0),
            distance_m: state.position.x,
            speed_mps: speed_at(state.velocity),
            progress,
        }
    }
}

/// Stepped run measured against its closed-form prediction.
///
/// The peak is only as good as the time step: the stepped trail rarely lands
/// a sample exactly on the apex, so `peak_error_m` shrinks with smaller steps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlightComparison {
    pub sampled_peak_m: f64,
    pub analytic_peak_m: f64,
    pub peak_error_m: f64,
    pub sampled_range_m: f64,
    pub analytic_range_m: f64,
    pub range_error_m: f64,
    pub sampled_flight_time_s: f64,
    pub analytic_flight_time_s: f64,
    pub launch_speed_mps: f64,
    pub landing_speed_mps: f64,
    pub samples: usize,
}

impl FlightComparison {
    /// Returns `None` for an empty trajectory.
    pub fn from_run(trajectory: &TrajectoryData, results: &DerivedResults) -> Option<Self> {
        let first = trajectory.iter().next()?;
        let last = trajectory.last()?;
        let sampled_peak_m = trajectory
            .positions()
            .iter()
            .fold(0.0f64, |acc, p| acc.max(p.y));

        Some(Self {
            sampled_peak_m,
            analytic_peak_m: results.max_height,
            peak_error_m: (results.max_height - sampled_peak_m).abs(),
            sampled_range_m: last.position.x,
            analytic_range_m: results.horizontal_range,
            range_error_m: (results.horizontal_range - last.position.x).abs(),
            sampled_flight_time_s: last.elapsed_s,
            analytic_flight_time_s: results.time_of_flight,
            launch_speed_mps: speed_at(first.velocity),
            landing_speed_mps: speed_at(last.velocity),
            samples: trajectory.len(),
        })
    }
}
