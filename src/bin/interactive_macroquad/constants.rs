pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 420.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 130.0;
pub const BOTTOM_MARGIN: f32 = 120.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 86.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

pub const MAX_RELEASE_ANGLE_DEG: f32 = 90.0;
pub const MAX_ARM_LENGTH_M: f32 = 5.0;
pub const ANGLE_KEY_RATE_DEG: f32 = 30.0;
pub const LENGTH_KEY_RATE_MPS: f32 = 1.0;
pub const SPEED_KEY_RATE_MPS: f32 = 15.0;

pub const PIVOT_DROP_PX: f32 = 30.0;
pub const BOB_RADIUS_PX: f32 = 18.0;
pub const SHOT_RADIUS_PX: f32 = 7.0;
pub const PREVIEW_SAMPLES: usize = 120;
pub const TRAIL_MAX_POINTS: usize = 2_000;
