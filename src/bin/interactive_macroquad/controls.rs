use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use parabolic_sim::{EnginePhase, GravityPreset};

use crate::constants::{GRAVITY_SLIDER_MPS2, SPEED_SLIDER_MPS};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) play_pause: bool,
    pub(crate) reset: bool,
    pub(crate) preset: Option<GravityPreset>,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            play_pause: self.play_pause || other.play_pause,
            reset: self.reset || other.reset,
            preset: self.preset.or(other.preset),
        }
    }
}

pub(crate) fn hotkey_actions(state: &AppRuntime) -> FrameActions {
    FrameActions {
        play_pause: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        preset: is_key_pressed(KeyCode::G).then(|| {
            state
                .draft
                .preset
                .map_or(GravityPreset::Earth, GravityPreset::next)
        }),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let config = *state.engine.config();
    let phase = state.engine.phase();

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 120.0), vec2(370.0, 360.0))
        .label("Launch Controls")
        .ui(&mut *root_ui(), |ui| {
            ui.label(
                None,
                &format!(
                    "Environment: {} (g = {:.2} m/s^2)",
                    state.draft.environment_name(),
                    state.draft.gravity_mps2
                ),
            );
            ui.separator();
            ui.slider(
                hash!(),
                "Angle (deg)",
                config.min_angle_deg as f32..config.max_angle_deg as f32,
                &mut state.draft.angle_deg,
            );
            ui.slider(
                hash!(),
                "Speed (m/s)",
                SPEED_SLIDER_MPS.0..SPEED_SLIDER_MPS.1,
                &mut state.draft.speed_mps,
            );
            ui.slider(
                hash!(),
                "Gravity (m/s^2)",
                GRAVITY_SLIDER_MPS2.0..GRAVITY_SLIDER_MPS2.1,
                &mut state.draft.gravity_mps2,
            );
            ui.separator();
            for preset in GravityPreset::ALL {
                if ui.button(None, preset.name()) {
                    actions.preset = Some(preset);
                }
            }
            ui.separator();
            let play_label = if phase == EnginePhase::Running {
                "Pause (Space)"
            } else {
                "Play (Space)"
            };
            if ui.button(None, play_label) {
                actions.play_pause = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            if ui.button(None, "Toggle Preview") {
                state.show_preview = !state.show_preview;
            }
            ui.label(None, &format!("Flight state: {}", phase.label()));
            if phase != EnginePhase::Idle {
                ui.label(None, "Slider changes apply after Reset");
            }
        });

    if let Some(preset) = state.draft.preset {
        if (preset.gravity_mps2() as f32 - state.draft.gravity_mps2).abs() > 1e-3 {
            state.draft.preset = None;
        }
    }

    actions
}
