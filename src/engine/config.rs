use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::params::LaunchParameters;
use crate::error::SimError;

pub const DEFAULT_TIME_STEP_S: f64 = 1.0 / 60.0;
pub const DEFAULT_MIN_ANGLE_DEG: f64 = 5.0;
pub const DEFAULT_MAX_ANGLE_DEG: f64 = 85.0;

/// Tunables for [`SimulationEngine`](crate::engine::SimulationEngine).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Virtual time added per tick, independent of real frame duration.
    pub time_step_s: f64,
    pub min_angle_deg: f64,
    pub max_angle_deg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_step_s: DEFAULT_TIME_STEP_S,
            min_angle_deg: DEFAULT_MIN_ANGLE_DEG,
            max_angle_deg: DEFAULT_MAX_ANGLE_DEG,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.time_step_s.is_finite() || self.time_step_s <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "time step must be a finite value > 0 s, got {}",
                self.time_step_s
            )));
        }
        let in_domain = |a: f64| a.is_finite() && (0.0..=90.0).contains(&a);
        if !in_domain(self.min_angle_deg)
            || !in_domain(self.max_angle_deg)
            || self.min_angle_deg > self.max_angle_deg
        {
            return Err(SimError::InvalidConfig(format!(
                "angle limits must satisfy 0 <= min <= max <= 90, got [{}, {}]",
                self.min_angle_deg, self.max_angle_deg
            )));
        }
        Ok(())
    }

    pub fn clamp_angle(&self, angle_deg: f64) -> f64 {
        angle_deg.clamp(self.min_angle_deg, self.max_angle_deg)
    }

    /// Rejects parameters whose angle falls outside the configured limits.
    pub fn check_launch(&self, params: &LaunchParameters) -> Result<(), SimError> {
        let angle = params.angle_deg();
        if angle < self.min_angle_deg || angle > self.max_angle_deg {
            return Err(SimError::invalid(
                "angle",
                format!(
                    "{angle} degrees is outside the configured range [{}, {}]",
                    self.min_angle_deg, self.max_angle_deg
                ),
            ));
        }
        Ok(())
    }
}

/// On-disk TOML layout:
///
/// ```toml
/// [engine]
/// time_step_s = 0.01
///
/// [launch]
/// speed_mps = 20.0
/// angle_deg = 45.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub engine: EngineConfig,
    pub launch: Option<LaunchParameters>,
}

impl ConfigFile {
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        let file: Self = toml::from_str(text)?;
        file.engine.validate()?;
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
