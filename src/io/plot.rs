use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use plotters::prelude::*;

use crate::core::kinematics::sample_trajectory;
use crate::core::results::DerivedResults;
use crate::core::window::PlotWindow;
use crate::engine::state::TrajectoryData;
use crate::io::ExportError;

const PLOT_SIZE: (u32, u32) = (1200, 600);
const PREVIEW_SAMPLES: usize = 240;

/// `trajectory-YYYYmmdd-HHMMSS.svg` in the working directory.
pub fn default_plot_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("trajectory-{}.svg", now.format("%Y%m%d-%H%M%S")))
}

/// Draws the closed-form path and the stepped trail on one chart.
pub fn write_trajectory_svg(
    path: &Path,
    trajectory: &TrajectoryData,
    results: &DerivedResults,
    gravity_mps2: f64,
) -> Result<(), ExportError> {
    let window = trajectory
        .positions()
        .iter()
        .fold(PlotWindow::for_results(results), |w, p| w.including(*p));
    let preview = sample_trajectory(
        results.initial_velocity_x,
        results.initial_velocity_y,
        gravity_mps2,
        results.time_of_flight,
        PREVIEW_SAMPLES,
    );

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let caption = format!(
        "Range {:.2} m | Peak {:.2} m | Flight {:.2} s | {}",
        results.horizontal_range,
        results.max_height,
        results.time_of_flight,
        Local::now().format("%Y-%m-%d %H:%M"),
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..window.max_x, 0.0..window.max_y)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            preview.iter().map(|p| (p.x, p.y)),
            BLUE.mix(0.45).stroke_width(2),
        ))
        .map_err(plot_error)?
        .label("closed form")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            trajectory.positions().iter().map(|p| (p.x, p.y.max(0.0))),
            RED.stroke_width(2),
        ))
        .map_err(plot_error)?
        .label("stepped")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

fn plot_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Plot(err.to_string())
}
