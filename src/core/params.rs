use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;

/// Named gravitational environments offered by the input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GravityPreset {
    #[default]
    Earth,
    Moon,
    Mars,
    Jupiter,
}

impl GravityPreset {
    pub const ALL: [Self; 4] = [Self::Earth, Self::Moon, Self::Mars, Self::Jupiter];

    pub const fn gravity_mps2(self) -> f64 {
        match self {
            Self::Earth => EARTH_GRAVITY_MPS2,
            Self::Moon => 1.62,
            Self::Mars => 3.71,
            Self::Jupiter => 24.79,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
        }
    }

    /// Cycles through [`GravityPreset::ALL`].
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for GravityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for one simulated flight.
///
/// A value of this type always satisfies the physical domain: finite
/// non-negative speed, angle in [0°, 90°], finite positive gravity. Engine
/// specific angle limits are checked separately by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLaunchParameters")]
pub struct LaunchParameters {
    speed_mps: f64,
    angle_deg: f64,
    gravity_mps2: f64,
}

#[derive(Deserialize)]
struct RawLaunchParameters {
    speed_mps: f64,
    angle_deg: f64,
    #[serde(default = "default_gravity")]
    gravity_mps2: f64,
}

fn default_gravity() -> f64 {
    EARTH_GRAVITY_MPS2
}

impl TryFrom<RawLaunchParameters> for LaunchParameters {
    type Error = SimError;

    fn try_from(raw: RawLaunchParameters) -> Result<Self, Self::Error> {
        Self::new(raw.speed_mps, raw.angle_deg, raw.gravity_mps2)
    }
}

impl LaunchParameters {
    pub fn new(speed_mps: f64, angle_deg: f64, gravity_mps2: f64) -> Result<Self, SimError> {
        if !speed_mps.is_finite() || speed_mps < 0.0 {
            return Err(SimError::invalid(
                "speed",
                format!("expected a finite value >= 0 m/s, got {speed_mps}"),
            ));
        }
        if !angle_deg.is_finite() || !(0.0..=90.0).contains(&angle_deg) {
            return Err(SimError::invalid(
                "angle",
                format!("expected a value within [0, 90] degrees, got {angle_deg}"),
            ));
        }
        if !gravity_mps2.is_finite() || gravity_mps2 <= 0.0 {
            return Err(SimError::invalid(
                "gravity",
                format!("expected a finite value > 0 m/s^2, got {gravity_mps2}"),
            ));
        }

        Ok(Self {
            speed_mps,
            angle_deg,
            gravity_mps2,
        })
    }

    pub fn with_preset(
        speed_mps: f64,
        angle_deg: f64,
        preset: GravityPreset,
    ) -> Result<Self, SimError> {
        Self::new(speed_mps, angle_deg, preset.gravity_mps2())
    }

    pub const fn speed_mps(&self) -> f64 {
        self.speed_mps
    }

    pub const fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub const fn gravity_mps2(&self) -> f64 {
        self.gravity_mps2
    }
}

impl Default for LaunchParameters {
    fn default() -> Self {
        Self {
            speed_mps: 20.0,
            angle_deg: 45.0,
            gravity_mps2: EARTH_GRAVITY_MPS2,
        }
    }
}
