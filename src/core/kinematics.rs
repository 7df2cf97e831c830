//! Closed-form kinematics for a projectile launched from and landing on flat
//! ground under constant gravity. Every function is pure; callers are
//! expected to pass `gravity_mps2 > 0`.

use crate::core::vector::Vector2D;

/// Splits a launch speed into horizontal and vertical components.
/// The angle is given in degrees and converted to radians here.
pub fn velocity_components(speed_mps: f64, angle_deg: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    let vx = speed_mps * theta.cos();
    let vy = speed_mps * theta.sin();
    (vx, vy)
}

pub fn time_to_apex(vy: f64, gravity_mps2: f64) -> f64 {
    vy / gravity_mps2
}

/// Total flight time back to launch elevation.
pub fn time_of_flight(vy: f64, gravity_mps2: f64) -> f64 {
    2.0 * vy / gravity_mps2
}

pub fn max_height(vy: f64, gravity_mps2: f64) -> f64 {
    (vy * vy) / (2.0 * gravity_mps2)
}

pub fn range(vx: f64, time_of_flight_s: f64) -> f64 {
    vx * time_of_flight_s
}

/// Position at `time_s` after launch. Past the time of flight this keeps
/// extrapolating below ground, so display code must clamp.
pub fn position_at(vx: f64, vy: f64, gravity_mps2: f64, time_s: f64) -> Vector2D {
    let x = vx * time_s;
    let y = (vy * time_s) - (0.5 * gravity_mps2 * time_s * time_s);
    Vector2D::new(x, y)
}

pub fn velocity_at(vx: f64, vy: f64, gravity_mps2: f64, time_s: f64) -> Vector2D {
    Vector2D::new(vx, vy - (gravity_mps2 * time_s))
}

pub fn speed_at(velocity: Vector2D) -> f64 {
    velocity.length()
}

/// Evenly spaced closed-form points from launch to landing, inclusive.
/// At least two intervals are produced so a degenerate flight still yields
/// a drawable segment.
pub fn sample_trajectory(
    vx: f64,
    vy: f64,
    gravity_mps2: f64,
    time_of_flight_s: f64,
    samples: usize,
) -> Vec<Vector2D> {
    let sample_count = samples.max(2);
    (0..=sample_count)
        .map(|i| {
            let t = (i as f64 * time_of_flight_s) / sample_count as f64;
            let mut p = position_at(vx, vy, gravity_mps2, t);
            p.y = p.y.max(0.0);
            p
        })
        .collect()
}
