use serde::{Deserialize, Serialize};

use crate::core::kinematics::{
    max_height, range, time_of_flight, time_to_apex, velocity_components,
};
use crate::core::params::LaunchParameters;

/// Closed-form outcome of one parameter set, independent of stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedResults {
    pub initial_velocity_x: f64,
    pub initial_velocity_y: f64,
    pub time_to_max_height: f64,
    pub time_of_flight: f64,
    pub max_height: f64,
    pub horizontal_range: f64,
}

pub fn compute_results(params: &LaunchParameters) -> DerivedResults {
    let g = params.gravity_mps2();
    let (vx, vy) = velocity_components(params.speed_mps(), params.angle_deg());
    let time_to_max_height = time_to_apex(vy, g);
    let flight = time_of_flight(vy, g);

    DerivedResults {
        initial_velocity_x: vx,
        initial_velocity_y: vy,
        time_to_max_height,
        time_of_flight: flight,
        max_height: max_height(vy, g),
        horizontal_range: range(vx, flight),
    }
}
