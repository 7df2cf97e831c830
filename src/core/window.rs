use crate::core::results::DerivedResults;
use crate::core::vector::Vector2D;

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// World-space extent shown by a plot, in meters from the launch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotWindow {
    pub max_x: f64,
    pub max_y: f64,
}

impl PlotWindow {
    /// Pads the raw extent and widens one axis so the window keeps a fixed
    /// distance:height ratio. Both spans are at least one meter.
    pub fn fixed_ratio(raw_max_x: f64, raw_max_y: f64) -> Self {
        let raw_x_span = raw_max_x.max(1.0);
        let raw_y_span = raw_max_y.max(1.0);

        let mut max_x = (raw_x_span * (1.0 + X_PADDING_RATIO)).max(1.0);
        let mut max_y = (raw_y_span * (1.0 + Y_PADDING_RATIO)).max(1.0);

        if max_x / max_y < DISTANCE_TO_HEIGHT_RATIO {
            max_x = max_y * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            max_y = max_x / DISTANCE_TO_HEIGHT_RATIO;
        }

        Self { max_x, max_y }
    }

    pub fn for_results(results: &DerivedResults) -> Self {
        Self::fixed_ratio(results.horizontal_range, results.max_height)
    }

    /// Grows the window so `point` stays visible.
    pub fn including(self, point: Vector2D) -> Self {
        if point.x <= self.max_x && point.y <= self.max_y {
            return self;
        }
        Self::fixed_ratio(self.max_x.max(point.x), self.max_y.max(point.y))
    }

    /// Maps a world point to `[0, 1]` fractions of the window, with y up.
    pub fn normalized(&self, point: Vector2D) -> (f64, f64) {
        (point.x / self.max_x, point.y / self.max_y)
    }
}
