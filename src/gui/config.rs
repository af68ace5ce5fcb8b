use eframe::egui::Color32;

/// Viewer settings. Owned by the [`App`](super::App) that uses them.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Generations per second at time scale x1.
    pub ticks_per_second: f64,
    /// Side of one cell in pixels at zoom 1.
    pub cell_size: f32,
    /// Camera panning speed in pixels per second.
    pub camera_speed: f32,
    pub max_fps: f64,
    /// Side of the square filled by "Random soup".
    pub soup_size: u32,
    pub soup_fill_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticks_per_second: 12.,
            cell_size: 25.,
            camera_speed: 150.,
            max_fps: 60.,
            soup_size: 64,
            soup_fill_rate: 0.3,
        }
    }
}

impl Config {
    pub const MIN_TIME_SCALE: f64 = 0.25;
    pub const MAX_TIME_SCALE: f64 = 8.;
    pub const MIN_ZOOM: f32 = 0.25;
    pub const MAX_ZOOM: f32 = 2.;
    pub const MAX_TICKS_PER_FRAME: u32 = 64;
    /// Grid lines are skipped when cells get smaller than this many pixels.
    pub const MIN_GRID_LINE_STEP: f32 = 4.;

    pub const FRAME_MARGIN: f32 = 10.;
    pub const CONTROL_PANEL_WIDTH: f32 = 280.;
    pub const TEXT_SIZE: f32 = 14.;
    pub const TEXT_COLOR: Color32 = Color32::BLACK;
    pub const BUTTON_STROKE_WIDTH: f32 = 2.;
    pub const BUTTON_STROKE_COLOR: Color32 = Color32::DARK_GRAY;
    pub const BUTTON_FILL_COLOR: Color32 = Color32::LIGHT_GRAY;
    pub const WIDGET_GAP: f32 = 12.;

    pub const BACKGROUND_COLOR: Color32 = Color32::WHITE;
    pub const CELL_COLOR: Color32 = Color32::from_rgb(0, 185, 0);
    pub const GRID_COLOR: Color32 = Color32::from_rgb(128, 128, 128);
}
