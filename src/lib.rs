//! Projectile motion under constant gravity: closed-form kinematics, a
//! derived-results calculator, and a fixed-step engine that replays the
//! flight for an animated front end.

pub mod core;
pub mod engine;
pub mod error;
pub mod io;

pub use crate::core::params::{GravityPreset, LaunchParameters};
pub use crate::core::results::{DerivedResults, compute_results};
pub use crate::core::vector::Vector2D;
pub use crate::engine::config::EngineConfig;
pub use crate::engine::scheduler::{ManualScheduler, TickHandle, TickScheduler};
pub use crate::engine::state::{EnginePhase, ProjectileState, TrajectoryData};
pub use crate::engine::{SimulationEngine, TickOutcome};
pub use crate::error::SimError;
