// ui.rs - egui front end for the viewer
// Renders the engine's current generation and forwards every edit through
// ViewerInterface, so the engine stays the only owner of the grid.

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use automaton::{Boundary, catalog};

use crate::{Viewer, ViewerInterface};

const BOARD_PIXELS: f32 = 800.0;
const MAX_BOX_SIZE: f32 = 15.0;

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Cellular Automaton (Row Coroutines)");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Step")).clicked() {
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.apply_random_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.generation));
            });

            // Catalog
            ui.horizontal(|ui| {
                let entries = catalog::entries();
                let selected_name = entries
                    .get(self.selected_pattern)
                    .map_or("-", |pattern| pattern.name);

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(selected_name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in entries.iter().enumerate() {
                            let label = format!("{} ({:?})", pattern.name, pattern.category);
                            ui.selectable_value(&mut self.selected_pattern, i, label);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }
            });

            // Free-text pattern
            ui.horizontal(|ui| {
                ui.label("Text:");
                ui.text_edit_singleline(&mut self.pattern_text);
                ui.radio_value(&mut self.rle_dialect, true, "o/b/$");
                ui.radio_value(&mut self.rle_dialect, false, "A/D/,");
                if ui.button("Decode").clicked() {
                    self.is_running = false;
                    self.apply_text_pattern();
                }
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::RED, status.as_str());
            }

            ui.separator();

            // Speed, edges and colors
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                let mut boundary = self.boundary();
                ui.radio_value(&mut boundary, Boundary::Bounded, "Bounded");
                ui.radio_value(&mut boundary, Boundary::Toroidal, "Toroidal");
                if boundary != self.boundary() {
                    self.set_boundary(boundary);
                }

                ui.checkbox(&mut self.use_coroutines, "Row coroutines");

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click cells to toggle them alive/dead while paused.");

            ui.separator();

            // Draw the whole playground, border included
            let (rows, cols) = self.grid().dimensions();
            let spacing = 0.5;
            let box_size = (BOARD_PIXELS / rows.max(cols).max(1) as f32 - spacing).min(MAX_BOX_SIZE);
            let pitch = box_size + spacing;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * cols as f32 - spacing, pitch * rows as f32 - spacing);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            for (row, cells) in self.grid().iter_rows().enumerate() {
                for (col, &alive) in cells.iter().enumerate() {
                    let x = start_pos.x + col as f32 * pitch;
                    let y = start_pos.y + row as f32 * pitch;
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            // Handle clicking (only when not running)
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - start_pos;
                    if offset.x >= 0.0 && offset.y >= 0.0 {
                        let row = (offset.y / pitch) as usize;
                        let col = (offset.x / pitch) as usize;
                        self.toggle_cell(row, col);
                    }
                }
            }

            ui.separator();

            // Statistics
            let total = (rows * cols).max(1);
            let live_cells = self.grid().population();

            ui.horizontal(|ui| {
                ui.label(format!("Size: {}x{}", rows, cols));
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", rows * cols - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
