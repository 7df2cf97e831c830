use macroquad::prelude::*;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use parabolic_sim::core::kinematics::sample_trajectory;
use parabolic_sim::core::window::PlotWindow;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, GRID_COLOR, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH,
    LEFT_MARGIN, MSAA_SAMPLES, PREVIEW_COLOR, PREVIEW_SAMPLES, RIGHT_MARGIN, TOP_MARGIN,
    TRAIL_COLOR, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::{apply_actions, step_active_flight};
use crate::hud::draw_hud;
use crate::render::{PlotRect, draw_axis_tick_labels, draw_grid, draw_path, draw_projectile};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Motion Lab".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub(crate) async fn run() {
    init_logging();

    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("could not load '{UI_FONT_PATH}': {err}; falling back to default font");
            None
        }
    };

    let mut state = match AppRuntime::new() {
        Ok(state) => state,
        Err(err) => {
            error!(%err, "could not start the simulation engine");
            return;
        }
    };

    loop {
        let screen_w = screen_width();
        let screen_h = screen_height();
        let rect = PlotRect {
            left: LEFT_MARGIN,
            right: screen_w - RIGHT_MARGIN,
            top: TOP_MARGIN,
            bottom: screen_h - BOTTOM_MARGIN,
        };

        let actions = hotkey_actions(&state).merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);
        step_active_flight(&mut state);

        let results = state.engine.results();
        let gravity = state.engine.active_parameters().gravity_mps2();
        let preview = sample_trajectory(
            results.initial_velocity_x,
            results.initial_velocity_y,
            gravity,
            results.time_of_flight,
            PREVIEW_SAMPLES,
        );
        let window = state
            .engine
            .trajectory()
            .positions()
            .iter()
            .fold(PlotWindow::for_results(&results), |w, p| w.including(*p));

        clear_background(BACKGROUND);
        draw_grid(rect, GRID_COLOR);
        draw_axis_tick_labels(rect, &window, ui_font.as_ref());

        if state.show_preview {
            draw_path(&preview, &window, rect, 2.0, PREVIEW_COLOR);
        }
        draw_path(
            state.engine.trajectory().positions(),
            &window,
            rect,
            3.0,
            TRAIL_COLOR,
        );

        let current = state.engine.state();
        draw_projectile(current.position, current.velocity, &window, rect);

        draw_hud(&state, &window, rect, screen_h, ui_font.as_ref());

        next_frame().await;
    }
}
