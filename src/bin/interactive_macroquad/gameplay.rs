use parabolic_sim::{EnginePhase, TickOutcome};

use crate::controls::FrameActions;
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if let Some(preset) = actions.preset {
        state.draft.apply_preset(preset);
        state.status_line = format!("Gravity set to {}", preset.name());
    }

    if actions.reset {
        state.engine.reset();
        state.status_line = "Reset".to_string();
    }

    state.sync_draft();

    if actions.play_pause {
        match state.engine.phase() {
            EnginePhase::Running => {
                state.engine.pause();
                state.status_line = "Paused".to_string();
            }
            EnginePhase::Completed => {
                state.status_line = "Landed | press R to reset".to_string();
            }
            phase => match state.engine.play() {
                Ok(()) => {
                    state.status_line = if phase == EnginePhase::Paused {
                        "Resumed".to_string()
                    } else {
                        "Launched".to_string()
                    };
                }
                Err(err) => state.status_line = err.to_string(),
            },
        }
    }
}

/// Fires at most one engine tick for this frame.
pub(crate) fn step_active_flight(state: &mut AppRuntime) {
    if state.engine.run_frame() == Some(TickOutcome::Landed) && state.take_landed() {
        let results = state.engine.results();
        state.status_line = format!(
            "Landed at x={:.2} m after {:.2} s",
            results.horizontal_range, results.time_of_flight
        );
    }
}
