use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 420.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 140.0;
pub const BOTTOM_MARGIN: f32 = 150.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 92.0;
pub const PREVIEW_SAMPLES: usize = 160;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

pub const SPEED_SLIDER_MPS: (f32, f32) = (1.0, 60.0);
pub const GRAVITY_SLIDER_MPS2: (f32, f32) = (0.5, 30.0);

pub const BACKGROUND: Color = Color::new(0.98, 0.984, 0.992, 1.0);
pub const GRID_COLOR: Color = Color::new(0.89, 0.906, 0.925, 1.0);
pub const PREVIEW_COLOR: Color = Color::new(0.298, 0.553, 0.961, 0.55);
pub const TRAIL_COLOR: Color = Color::new(0.212, 0.482, 0.961, 1.0);
pub const VELOCITY_COLOR: Color = Color::new(0.0, 0.55, 0.3, 1.0);
pub const VELOCITY_ARROW_SECONDS: f64 = 0.15;
