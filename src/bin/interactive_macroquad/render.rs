use macroquad::prelude::*;

use parabolic_sim::Vector2D;
use parabolic_sim::core::window::PlotWindow;

use crate::constants::{VELOCITY_ARROW_SECONDS, VELOCITY_COLOR, X_GRID_LINES, Y_GRID_LINES};

/// Screen-space rectangle the world window is drawn into.
#[derive(Clone, Copy)]
pub(crate) struct PlotRect {
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
}

impl PlotRect {
    pub(crate) fn to_screen(&self, window: &PlotWindow, world: Vector2D) -> Vec2 {
        let (fx, fy) = window.normalized(world);
        let plot_w = (self.right - self.left).max(1.0);
        let plot_h = (self.bottom - self.top).max(1.0);
        vec2(
            self.left + fx as f32 * plot_w,
            self.bottom - fy as f32 * plot_h,
        )
    }
}

fn format_axis_value(value: f64, axis_max: f64) -> String {
    if axis_max >= 1000.0 {
        format!("{value:.0}")
    } else if axis_max >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(rect: PlotRect, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = rect.left + t * (rect.right - rect.left);
        draw_line(x, rect.top, x, rect.bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = rect.bottom - t * (rect.bottom - rect.top);
        draw_line(rect.left, y, rect.right, y, 1.0, color);
    }
    draw_line(rect.left, rect.bottom, rect.right, rect.bottom, 2.0, DARKGRAY);
    draw_line(rect.left, rect.top, rect.left, rect.bottom, 2.0, DARKGRAY);
}

pub(crate) fn draw_axis_tick_labels(rect: PlotRect, window: &PlotWindow, font: Option<&Font>) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = rect.left + t * (rect.right - rect.left);
        let label = format_axis_value(f64::from(t) * window.max_x, window.max_x);
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            rect.bottom + 22.0,
            tick_font_size,
            label_color,
            font,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = rect.bottom - t * (rect.bottom - rect.top);
        let label = format_axis_value(f64::from(t) * window.max_y, window.max_y);
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (rect.left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            label_color,
            font,
        );
    }

    draw_ui_text(
        "Distance (m)",
        rect.right - 130.0,
        rect.bottom + 48.0,
        18,
        label_color,
        font,
    );
    draw_ui_text(
        "Height (m)",
        rect.left + 10.0,
        rect.top - 8.0,
        18,
        label_color,
        font,
    );
}

pub(crate) fn draw_path(
    points: &[Vector2D],
    window: &PlotWindow,
    rect: PlotRect,
    thickness: f32,
    color: Color,
) {
    if points.len() < 2 {
        return;
    }
    let mut prev = rect.to_screen(window, points[0]);
    for point in points.iter().skip(1).copied() {
        let cur = rect.to_screen(window, point);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

/// Ball plus a velocity arrow covering `VELOCITY_ARROW_SECONDS` of travel.
pub(crate) fn draw_projectile(
    position: Vector2D,
    velocity: Vector2D,
    window: &PlotWindow,
    rect: PlotRect,
) {
    let p = rect.to_screen(window, Vector2D::new(position.x, position.y.max(0.0)));
    let tip = rect.to_screen(window, position + velocity * VELOCITY_ARROW_SECONDS);
    if p.distance(tip) > 2.0 {
        draw_line(p.x, p.y, tip.x, tip.y, 2.5, VELOCITY_COLOR);
        draw_circle(tip.x, tip.y, 3.5, VELOCITY_COLOR);
    }
    draw_circle(p.x, p.y, 7.0, RED);
    draw_circle_lines(p.x, p.y, 7.0, 2.0, MAROON);
}
