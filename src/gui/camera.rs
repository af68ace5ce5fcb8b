use super::Config;
use crate::Cell;
use eframe::egui::{pos2, vec2, Pos2, Rect, Vec2};

/// Maps between canvas pixels and cell coordinates.
///
/// `position` is the pixel offset of cell `(0, 0)` from the canvas origin and `zoom`
/// divides the configured cell size, so a larger zoom shows more cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    pub speed: f32,
}

impl Camera {
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.,
            speed,
        }
    }

    /// Side of one cell on screen, in pixels.
    pub fn step(&self, cell_size: f32) -> f32 {
        cell_size / self.zoom
    }

    /// Moves the view in `direction` (unit axes, +y is down) for `dt` seconds.
    pub fn pan(&mut self, direction: Vec2, dt: f32) {
        // moving the view right shifts the content left
        self.position -= direction * self.speed * dt;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom / 2.).clamp(Config::MIN_ZOOM, Config::MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * 2.).clamp(Config::MIN_ZOOM, Config::MAX_ZOOM);
    }

    /// Cell under the canvas-relative point `p`.
    pub fn screen_to_cell(&self, p: Vec2, cell_size: f32) -> Cell {
        let step = self.step(cell_size);
        let q = (p - self.position) / step;
        Cell::new(q.x.floor() as i64, q.y.floor() as i64)
    }

    /// Screen rectangle covered by `cell` on a canvas whose top-left corner is `origin`.
    pub fn cell_rect(&self, cell: Cell, origin: Pos2, cell_size: f32) -> Rect {
        let step = self.step(cell_size);
        let min = origin + self.position + vec2(cell.x as f32, cell.y as f32) * step;
        Rect::from_min_size(min, Vec2::splat(step))
    }

    /// Inclusive `[min, max]` range of cells intersecting a canvas of `size` pixels.
    pub fn visible_cells(&self, size: Vec2, cell_size: f32) -> [Cell; 2] {
        let lo = self.screen_to_cell(Vec2::ZERO, cell_size);
        let hi = self.screen_to_cell(size, cell_size);
        [lo, hi]
    }

    /// Places `cell` in the middle of a canvas of `size` pixels.
    pub fn centre_on(&mut self, cell: Cell, size: Vec2, cell_size: f32) {
        let step = self.step(cell_size);
        let centre = pos2(cell.x as f32 + 0.5, cell.y as f32 + 0.5);
        self.position = size / 2. - centre.to_vec2() * step;
    }
}
