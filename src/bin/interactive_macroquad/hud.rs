use macroquad::prelude::*;

use parabolic_sim::Vector2D;
use parabolic_sim::core::window::PlotWindow;

use crate::constants::{CONTROLS_Y, TITLE_Y};
use crate::render::{PlotRect, draw_ui_text};
use crate::state::AppRuntime;

pub(crate) fn draw_hud(
    state: &AppRuntime,
    window: &PlotWindow,
    rect: PlotRect,
    screen_h: f32,
    font: Option<&Font>,
) {
    draw_range_label(state, window, rect, font);
    draw_header_block(rect, font);
    draw_progress_bar(state.engine.progress() as f32, rect);
    draw_status_block(state, rect.left, screen_h, font);
    draw_comparison_block(state, rect, font);
}

fn draw_range_label(state: &AppRuntime, window: &PlotWindow, rect: PlotRect, font: Option<&Font>) {
    let range_m = state.engine.results().horizontal_range;
    let range_label = format!("{range_m:.2} m");
    let range_label_size = measure_text(&range_label, font, 18, 1.0);
    let landing_point = rect.to_screen(window, Vector2D::new(range_m, 0.0));
    let label_x = (landing_point.x - (range_label_size.width * 0.5))
        .clamp(rect.left + 4.0, rect.right - range_label_size.width - 4.0);
    let label_y = (rect.bottom - 12.0).max(rect.top + 20.0);
    draw_ui_text(&range_label, label_x, label_y, 18, DARKGRAY, font);
}

fn draw_header_block(rect: PlotRect, font: Option<&Font>) {
    draw_ui_text(
        "Projectile Motion Lab",
        rect.left,
        TITLE_Y,
        30,
        Color::from_rgba(30, 30, 35, 255),
        font,
    );
    draw_ui_text(
        "Controls: sliders set speed/angle/gravity | Space play/pause | R reset | G cycle gravity",
        rect.left + 12.0,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
}

fn draw_progress_bar(progress: f32, rect: PlotRect) {
    let y = rect.bottom + 58.0;
    let w = rect.right - rect.left;
    draw_rectangle(rect.left, y, w, 6.0, Color::from_rgba(226, 232, 240, 255));
    draw_rectangle(
        rect.left,
        y,
        w * progress.clamp(0.0, 1.0),
        6.0,
        Color::from_rgba(54, 123, 245, 255),
    );
}

fn draw_status_block(state: &AppRuntime, left: f32, screen_h: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    let params = state.engine.active_parameters();
    let results = state.engine.results();
    let live = state.engine.live_metrics();

    draw_ui_text(
        &format!(
            "Angle: {:.1} deg | Speed: {:.1} m/s | g: {:.2} m/s^2 ({})",
            params.angle_deg(),
            params.speed_mps(),
            params.gravity_mps2(),
            state.draft.environment_name()
        ),
        left,
        screen_h - 68.0,
        20,
        header_color,
        font,
    );
    draw_ui_text(
        &format!(
            "Closed form -> vx {:.2} m/s, vy {:.2} m/s, apex {:.2} s, flight {:.2} s, peak {:.2} m, range {:.2} m",
            results.initial_velocity_x,
            results.initial_velocity_y,
            results.time_to_max_height,
            results.time_of_flight,
            results.max_height,
            results.horizontal_range
        ),
        left,
        screen_h - 40.0,
        18,
        DARKGRAY,
        font,
    );
    draw_ui_text(
        &format!(
            "t = {:.2} s | x = {:.2} m | y = {:.2} m | speed {:.2} m/s | {:.0}% | {} | {}",
            live.elapsed_s,
            live.distance_m,
            live.height_m,
            live.speed_mps,
            live.progress * 100.0,
            state.engine.phase().label(),
            state.status_line
        ),
        left,
        screen_h - 12.0,
        20,
        BLUE,
        font,
    );
}

fn draw_comparison_block(state: &AppRuntime, rect: PlotRect, font: Option<&Font>) {
    if !state.engine.is_completed() {
        return;
    }
    let Some(cmp) = state.engine.comparison() else {
        return;
    };

    let lines = [
        format!("Samples: {}", cmp.samples),
        format!(
            "Peak: stepped {:.3} m vs {:.3} m",
            cmp.sampled_peak_m, cmp.analytic_peak_m
        ),
        format!(
            "Range: stepped {:.3} m vs {:.3} m",
            cmp.sampled_range_m, cmp.analytic_range_m
        ),
        format!(
            "Speed: launch {:.2} m/s, landing {:.2} m/s",
            cmp.launch_speed_mps, cmp.landing_speed_mps
        ),
    ];
    let x = rect.right - 340.0;
    for (i, line) in lines.iter().enumerate() {
        draw_ui_text(
            line,
            x,
            rect.top + 24.0 + i as f32 * 22.0,
            18,
            DARKGREEN,
            font,
        );
    }
}
