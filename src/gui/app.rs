use super::{Camera, Config, FpsLimiter, Ticker, TimeScale};
use crate::{parse_rle, Automaton, Cell, Pattern, SparseGrid, PATTERNS};
use anyhow::Context as _;
use eframe::egui::{CentralPanel, Color32, Context, Frame, Key, Margin, Rect, SidePanel, Vec2};
use egui_file::FileDialog;
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

pub struct App {
    pub(super) automaton: Automaton,      // Simulated Game of Life.
    pub(super) camera: Camera,            // Pan and zoom of the canvas.
    pub(super) config: Config,            // Viewer settings.
    pub(super) time_scale: TimeScale,     // Multiplier of the generation rate.
    pub(super) ticker: Ticker,            // Converts elapsed time into generations.
    pub(super) fps_limiter: FpsLimiter,   // Limits the frame rate to `config.max_fps`.
    pub(super) is_running: bool,          // Whether generations advance on their own.
    pub(super) do_one_step: bool,         // Do one step on the next frame.
    pub(super) selected_pattern: usize,   // Index into `PATTERNS` for the "Place" button.
    pub(super) last_update_duration: f64, // Duration of the last automaton update in seconds.
    pub(super) canvas_rect: Option<Rect>, // Part of the window displaying the cells.
    pub(super) status: Option<String>,    // Last error shown under the controls.
    pub(super) open_file_dialog: Option<FileDialog>,
    pub(super) opened_file: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_automaton(config, Automaton::new())
    }

    pub fn with_automaton(config: Config, automaton: Automaton) -> Self {
        Self {
            automaton,
            camera: Camera::new(config.camera_speed),
            config,
            time_scale: TimeScale::default(),
            ticker: Ticker::default(),
            fps_limiter: FpsLimiter::default(),
            is_running: false,
            do_one_step: false,
            selected_pattern: 0,
            last_update_duration: 0.,
            canvas_rect: None,
            status: None,
            open_file_dialog: None,
            opened_file: None,
        }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    fn canvas_size(&self) -> Vec2 {
        self.canvas_rect.map_or(Vec2::ZERO, |r| r.size())
    }

    /// Cell currently in the middle of the canvas.
    pub fn view_centre(&self) -> Cell {
        self.camera
            .screen_to_cell(self.canvas_size() / 2., self.config.cell_size)
    }

    /// Replaces the automaton, pauses it and brings its cells into view.
    pub fn replace_automaton(&mut self, automaton: Automaton) {
        self.automaton = automaton;
        self.is_running = false;
        self.ticker.reset();
        self.status = None;
        self.reset_view();
    }

    /// Centres the camera on the live cells, or on the origin for an empty grid.
    pub fn reset_view(&mut self) {
        self.camera.zoom = 1.;
        let centre = match self.automaton.grid().bounding_box() {
            Some([lo, hi]) => Cell::new(lo.x + (hi.x - lo.x) / 2, lo.y + (hi.y - lo.y) / 2),
            None => Cell::default(),
        };
        self.camera
            .centre_on(centre, self.canvas_size(), self.config.cell_size);
    }

    /// Reads an RLE file into a fresh automaton.
    pub fn load_rle_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cells =
            parse_rle(&data).with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!(path = %path.display(), cells = cells.len(), "loaded pattern");
        self.replace_automaton(Automaton::from_grid(SparseGrid::from_cells(cells)));
        Ok(())
    }

    /// Adds `pattern` around the view centre; returns the number of cells activated.
    pub fn place_pattern(&mut self, pattern: &Pattern) -> anyhow::Result<usize> {
        let cells = pattern
            .cells()
            .with_context(|| format!("built-in pattern {} is malformed", pattern.name))?;
        let width = cells.iter().map(|c| c.x).max().unwrap_or(0);
        let height = cells.iter().map(|c| c.y).max().unwrap_or(0);
        let centre = self.view_centre();
        let offset = centre.offset(-width / 2, -height / 2);
        let added = self.automaton.grid_mut().insert_cells(cells, offset);
        tracing::debug!(pattern = pattern.name, %offset, added, "placed pattern");
        Ok(added)
    }

    pub fn random_soup(&mut self) {
        let size = self.config.soup_size;
        let grid = SparseGrid::random(size, size, None, self.config.soup_fill_rate);
        self.replace_automaton(Automaton::from_grid(grid));
    }

    pub fn clear(&mut self) {
        self.replace_automaton(Automaton::new());
    }

    /// Toggles the cell under the canvas-relative point `p`.
    pub fn click_at(&mut self, p: Vec2) -> bool {
        let cell = self.camera.screen_to_cell(p, self.config.cell_size);
        self.automaton.toggle(cell)
    }

    pub(super) fn current_pattern(&self) -> &'static Pattern {
        &PATTERNS[self.selected_pattern.min(PATTERNS.len() - 1)]
    }

    pub(super) fn open_file(&mut self) {
        let mut dialog = FileDialog::open_file(self.opened_file.clone());
        dialog.open();
        self.open_file_dialog = Some(dialog);
    }

    pub(super) fn report(&mut self, result: anyhow::Result<()>) {
        if let Err(err) = result {
            tracing::warn!("{err:#}");
            self.status = Some(format!("{err:#}"));
        }
    }

    fn update_automaton(&mut self) {
        let mut steps = if self.is_running {
            let rate = self.config.ticks_per_second * self.time_scale.value();
            self.ticker.poll(rate)
        } else {
            self.ticker.reset();
            0
        };
        if self.do_one_step {
            steps += 1;
            self.do_one_step = false;
        }
        if steps == 0 {
            return;
        }

        let timer = Instant::now();
        if let Err(err) = self.automaton.advance(steps.into()) {
            tracing::error!(%err, "generation update rejected");
            self.is_running = false;
            self.status = Some(err.to_string());
        }
        self.last_update_duration = timer.elapsed().as_secs_f64();
    }

    fn handle_input(&mut self, ctx: &Context, canvas: Rect) {
        ctx.input(|input| {
            if input.key_pressed(Key::Space) {
                self.is_running = !self.is_running;
            }
            if input.key_pressed(Key::N) && !self.is_running {
                self.do_one_step = true;
            }
            if input.key_pressed(Key::Equals) || input.key_pressed(Key::Plus) {
                self.time_scale.faster();
            }
            if input.key_pressed(Key::Minus) {
                self.time_scale.slower();
            }

            // WASD-movement
            let mut direction = Vec2::ZERO;
            if input.key_down(Key::W) {
                direction.y -= 1.;
            }
            if input.key_down(Key::A) {
                direction.x -= 1.;
            }
            if input.key_down(Key::S) {
                direction.y += 1.;
            }
            if input.key_down(Key::D) {
                direction.x += 1.;
            }
            if direction != Vec2::ZERO {
                self.camera.pan(direction, input.stable_dt);
            }

            let hovered = input
                .pointer
                .latest_pos()
                .is_some_and(|pos| canvas.contains(pos));
            if hovered && input.raw_scroll_delta.y != 0. {
                let pointer = input.pointer.latest_pos().unwrap_or(canvas.center());
                let anchor = pointer - canvas.min;
                let before = self.camera.step(self.config.cell_size);
                if input.raw_scroll_delta.y > 0. {
                    self.camera.zoom_in();
                } else {
                    self.camera.zoom_out();
                }
                // keep the cell under the pointer in place
                let ratio = self.camera.step(self.config.cell_size) / before;
                self.camera.position = anchor + (self.camera.position - anchor) * ratio;
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        SidePanel::left("controls")
            .exact_width(Config::CONTROL_PANEL_WIDTH)
            .frame(
                Frame::default()
                    .inner_margin(Margin::same(Config::FRAME_MARGIN))
                    .fill(Color32::from_gray(230)),
            )
            .show(ctx, |ui| self.draw_controls(ui));

        CentralPanel::default()
            .frame(Frame::default().fill(Config::BACKGROUND_COLOR))
            .show(ctx, |ui| {
                ctx.request_repaint();

                if let Some(canvas) = self.canvas_rect {
                    self.handle_input(ctx, canvas);
                }

                self.draw_canvas(ui);

                self.update_automaton();
            });

        let mut picked = None;
        if let Some(dialog) = &mut self.open_file_dialog {
            if dialog.show(ctx).selected() {
                picked = dialog.path().map(|p| p.to_path_buf());
            }
        }
        if let Some(path) = picked {
            let result = self.load_rle_file(&path);
            self.report(result);
            self.opened_file = Some(path);
            self.open_file_dialog = None;
        }

        self.fps_limiter.sleep(self.config.max_fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn app_with_canvas() -> App {
        let mut app = App::new(Config::default());
        app.canvas_rect = Some(Rect::from_min_size(pos2(0., 0.), vec2(500., 500.)));
        app
    }

    #[test]
    fn click_toggles_cell() {
        let mut app = app_with_canvas();
        assert!(app.click_at(vec2(30., 55.)));
        assert!(app.automaton().grid().is_live(Cell::new(1, 2)));
        assert!(!app.click_at(vec2(26., 74.)));
        assert!(app.automaton().grid().is_empty());
    }

    #[test]
    fn place_pattern_near_centre() {
        let mut app = app_with_canvas();
        let glider = Pattern::find("Glider").unwrap();
        assert_eq!(app.place_pattern(glider).unwrap(), 5);
        assert_eq!(app.place_pattern(glider).unwrap(), 0);

        let [lo, hi] = app.automaton().grid().bounding_box().unwrap();
        let centre = app.view_centre();
        assert!(lo.x <= centre.x && centre.x <= hi.x);
        assert!(lo.y <= centre.y && centre.y <= hi.y);
    }

    #[test]
    fn load_rle_file_replaces_grid() {
        let path = std::env::temp_dir().join(format!("sparse-life-{}.rle", std::process::id()));
        std::fs::write(&path, "#N Blinker\nx = 3, y = 1\n3o!\n").unwrap();

        let mut app = app_with_canvas();
        app.click_at(vec2(-100., -100.));
        app.is_running = true;
        app.load_rle_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(app.automaton().grid().population(), 3);
        assert!(!app.is_running);
        assert_eq!(app.view_centre(), Cell::new(1, 0));
    }

    #[test]
    fn load_rle_file_reports_errors() {
        let mut app = app_with_canvas();
        let missing = Path::new("/nonexistent/pattern.rle");
        let err = app.load_rle_file(missing).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));

        app.report(Err(err));
        assert!(app.status.is_some());
    }

    #[test]
    fn one_step_while_paused() {
        let mut app = app_with_canvas();
        for x in 0..3 {
            app.automaton.toggle(Cell::new(x, 0));
        }
        app.do_one_step = true;
        app.update_automaton();
        assert_eq!(app.automaton().generation(), 1);
        assert!(app.automaton().grid().is_live(Cell::new(1, -1)));

        app.update_automaton();
        assert_eq!(app.automaton().generation(), 1);
    }
}
