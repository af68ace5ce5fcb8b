use super::{App, Config};
use crate::{Cell, NiceInt, PATTERNS};
use eframe::egui::{pos2, Button, Color32, ComboBox, RichText, Sense, Slider, Stroke, Ui};

impl App {
    fn new_text(text: &str) -> RichText {
        RichText::new(text)
            .color(Config::TEXT_COLOR)
            .size(Config::TEXT_SIZE)
    }

    fn new_button(text: &str) -> Button {
        Button::new(Self::new_text(text))
            .fill(Config::BUTTON_FILL_COLOR)
            .stroke(Stroke::new(
                Config::BUTTON_STROKE_WIDTH,
                Config::BUTTON_STROKE_COLOR,
            ))
    }

    fn draw_simulation_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let text = if self.is_running { "Pause" } else { "Run" };
            if ui.add(Self::new_button(text)).clicked() {
                self.is_running = !self.is_running;
            }
            if ui
                .add_enabled(!self.is_running, Self::new_button("Next step"))
                .clicked()
            {
                self.do_one_step = true;
            }
        });

        ui.horizontal(|ui| {
            ui.label(Self::new_text("Time: "));
            if ui.add(Self::new_button("-")).clicked() {
                self.time_scale.slower();
            }
            ui.label(Self::new_text(&self.time_scale.to_string()));
            if ui.add(Self::new_button("+")).clicked() {
                self.time_scale.faster();
            }
        });

        ui.horizontal(|ui| {
            ui.label(Self::new_text("Max FPS: "));
            ui.add(Slider::new(&mut self.config.max_fps, 5.0..=240.0).logarithmic(true));
        });
    }

    fn draw_field_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ComboBox::from_id_source("pattern")
                .selected_text(self.current_pattern().name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.add(Self::new_button("Place")).clicked() {
                let result = self.place_pattern(self.current_pattern()).map(drop);
                self.report(result);
            }
        });

        ui.horizontal(|ui| {
            if ui.add(Self::new_button("Open RLE…")).clicked() {
                self.open_file();
            }
            if ui.add(Self::new_button("Random soup")).clicked() {
                self.random_soup();
            }
        });

        ui.horizontal(|ui| {
            if ui.add(Self::new_button("Clear")).clicked() {
                self.clear();
            }
            if ui.add(Self::new_button("Reset view")).clicked() {
                self.reset_view();
            }
        });
    }

    fn draw_info(&self, ui: &mut Ui) {
        let fps = self
            .fps_limiter
            .fps()
            .map_or_else(|| "N/A".to_string(), |fps| format!("{:.0}", fps));
        let pos = self.camera.position;
        let grid = self.automaton.grid();
        ui.label(Self::new_text(&format!(
            "FPS: {fps}\nPosition: [{}, {}]\nTime: {}",
            pos.x.floor(),
            pos.y.floor(),
            self.time_scale,
        )));
        ui.label(Self::new_text(&format!(
            "Generation: {}\nPopulation: {}\nTracked cells: {}\nLast update: {:.3} ms",
            NiceInt::from(self.automaton.generation()),
            NiceInt::from_usize(grid.population()),
            NiceInt::from_usize(grid.tracked_cells()),
            self.last_update_duration * 1e3,
        )));
        if let Some(status) = &self.status {
            ui.colored_label(Color32::DARK_RED, status.as_str());
        }
    }

    pub(super) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.group(|ui| self.draw_simulation_controls(ui));
            ui.add_space(Config::WIDGET_GAP);
            ui.group(|ui| self.draw_field_controls(ui));
            ui.add_space(Config::WIDGET_GAP);
            self.draw_info(ui);
            ui.add_space(Config::WIDGET_GAP);
            ui.label(
                RichText::new("Space: run/pause  N: step\n+/-: speed  WASD: move\nwheel: zoom  click: toggle")
                    .color(Config::BUTTON_STROKE_COLOR),
            );
        });
    }

    pub(super) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let rect = response.rect;
        if self.canvas_rect.is_none() {
            // first frame: the canvas size is known only now
            self.canvas_rect = Some(rect);
            self.reset_view();
        }
        let cell_size = self.config.cell_size;
        let step = self.camera.step(cell_size);

        painter.rect_filled(rect, 0., Config::BACKGROUND_COLOR);

        // Draw cells
        let grid = self.automaton.grid();
        let [lo, hi] = self.camera.visible_cells(rect.size(), cell_size);
        let visible = (hi.x - lo.x + 1) as u128 * (hi.y - lo.y + 1) as u128;
        let in_view = |x: i64, y: i64| (lo.x..=hi.x).contains(&x) && (lo.y..=hi.y).contains(&y);
        let draw_cell = |cell| {
            let r = self.camera.cell_rect(cell, rect.min, cell_size);
            painter.rect_filled(r, 0., Config::CELL_COLOR);
        };
        if (grid.population() as u128) < visible {
            grid.live_cells()
                .filter(|c| in_view(c.x, c.y))
                .for_each(draw_cell);
        } else {
            (lo.y..=hi.y)
                .flat_map(|y| (lo.x..=hi.x).map(move |x| Cell::new(x, y)))
                .filter(|&c| grid.is_live(c))
                .for_each(draw_cell);
        }

        // Draw lines
        if step >= Config::MIN_GRID_LINE_STEP {
            let stroke = Stroke::new(1., Config::GRID_COLOR);
            let mut x = rect.left() + self.camera.position.x.rem_euclid(step);
            while x <= rect.right() {
                painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
                x += step;
            }
            let mut y = rect.top() + self.camera.position.y.rem_euclid(step);
            while y <= rect.bottom() {
                painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
                y += step;
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let cell_state = self.click_at(pos - rect.min);
                tracing::debug!(alive = cell_state, "toggled cell");
            }
        }
        self.canvas_rect.replace(rect);
    }
}
