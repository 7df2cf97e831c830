use serde::Serialize;

use crate::core::params::LaunchParameters;
use crate::core::results::DerivedResults;
use crate::core::vector::Vector2D;

/// The single current sample of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ProjectileState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub elapsed_s: f64,
    pub is_active: bool,
}

impl ProjectileState {
    /// At rest at the origin, inactive.
    pub const ZERO: Self = Self {
        position: Vector2D::ZERO,
        velocity: Vector2D::ZERO,
        elapsed_s: 0.0,
        is_active: false,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub elapsed_s: f64,
}

impl From<&ProjectileState> for TrajectorySample {
    fn from(state: &ProjectileState) -> Self {
        Self {
            position: state.position,
            velocity: state.velocity,
            elapsed_s: state.elapsed_s,
        }
    }
}

/// Recorded history of one run in chronological order.
///
/// Stored as three parallel columns that always have the same length. Only
/// the engine can append or clear.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrajectoryData {
    positions: Vec<Vector2D>,
    velocities: Vec<Vector2D>,
    times: Vec<f64>,
}

impl TrajectoryData {
    pub(crate) fn push(&mut self, sample: TrajectorySample) {
        self.positions.push(sample.position);
        self.velocities.push(sample.velocity);
        self.times.push(sample.elapsed_s);
    }

    pub(crate) fn pop(&mut self) -> Option<TrajectorySample> {
        let position = self.positions.pop()?;
        let velocity = self.velocities.pop()?;
        let elapsed_s = self.times.pop()?;
        Some(TrajectorySample {
            position,
            velocity,
            elapsed_s,
        })
    }

    pub(crate) fn clear(&mut self) {
        self.positions.clear();
        self.velocities.clear();
        self.times.clear();
    }

    pub fn positions(&self) -> &[Vector2D] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vector2D] {
        &self.velocities
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<TrajectorySample> {
        Some(TrajectorySample {
            position: *self.positions.get(index)?,
            velocity: *self.velocities.get(index)?,
            elapsed_s: *self.times.get(index)?,
        })
    }

    pub fn last(&self) -> Option<TrajectorySample> {
        self.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = TrajectorySample> + '_ {
        self.positions
            .iter()
            .zip(&self.velocities)
            .zip(&self.times)
            .map(|((position, velocity), elapsed_s)| TrajectorySample {
                position: *position,
                velocity: *velocity,
                elapsed_s: *elapsed_s,
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnginePhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl EnginePhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }
}

/// Read-only view handed to presentation code.
#[derive(Clone, Debug, Serialize)]
pub struct EngineSnapshot {
    pub phase: EnginePhase,
    /// Parameters of the run `results` belong to.
    pub parameters: LaunchParameters,
    /// Accepted after the run started; applied on the next reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_parameters: Option<LaunchParameters>,
    pub results: DerivedResults,
    pub state: ProjectileState,
    pub progress: f64,
    pub samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64) -> TrajectorySample {
        TrajectorySample {
            position: Vector2D::new(t, 2.0 * t),
            velocity: Vector2D::new(1.0, -t),
            elapsed_s: t,
        }
    }

    #[test]
    fn columns_stay_aligned() {
        let mut data = TrajectoryData::default();
        data.push(sample(0.0));
        data.push(sample(0.5));
        assert_eq!(data.len(), 2);
        assert_eq!(data.positions().len(), data.velocities().len());
        assert_eq!(data.velocities().len(), data.times().len());
        assert_eq!(data.last(), Some(sample(0.5)));

        assert_eq!(data.pop(), Some(sample(0.5)));
        assert_eq!(data.iter().collect::<Vec<_>>(), vec![sample(0.0)]);

        data.clear();
        assert!(data.is_empty());
        assert_eq!(data.last(), None);
    }

    #[test]
    fn zero_state_is_inactive_origin() {
        assert_eq!(ProjectileState::ZERO, ProjectileState::default());
        assert!(!ProjectileState::ZERO.is_active);
    }
}
