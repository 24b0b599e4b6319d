// main.rs - Automaton viewer with row coroutines
// Each generation is computed by one tokio task per row, all reading the same
// snapshot of the engine, and installed in a single playground swap.

use eframe::egui;
use egui::Color32;
use log::{debug, error, info};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use automaton::{Automaton, Boundary, Charset, Grid, catalog, decode};

mod ui;

/// Side of the default playground, border included.
pub const PLAYGROUND_SIZE: usize = 52;
const HISTORY_LEN: usize = 10;

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;
    info!("Starting automaton_coro v{} ...", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cellular Automaton (Row Coroutines)",
        options,
        Box::new(|_cc| Box::new(Viewer::default())),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited: {err}"))
}

/// Row coroutine: one row of the next generation from a shared snapshot
async fn process_row(row_index: usize, snapshot: Arc<Automaton>) -> (usize, Vec<bool>) {
    let cols = snapshot.current_generation().cols();
    let mut row_result = Vec::with_capacity(cols);
    for col in 0..cols {
        row_result.push(snapshot.next_state(row_index, col));
        tokio::task::yield_now().await; // Cooperative yielding
    }
    (row_index, row_result)
}

pub struct Viewer {
    engine: Automaton,

    pub is_running: bool,
    pub use_coroutines: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub generation: u32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub pattern_text: String,
    pub rle_dialect: bool,
    pub status: Option<String>,

    runtime: tokio::runtime::Runtime,

    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl Default for Viewer {
    fn default() -> Self {
        let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");

        Self {
            engine: Automaton::new(Grid::new(PLAYGROUND_SIZE, PLAYGROUND_SIZE)),
            is_running: false,
            use_coroutines: true,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            generation: 0,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            pattern_text: "bo$2bo$3o!".to_string(),
            rle_dialect: true,
            status: None,
            runtime,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
        }
    }
}

/// Controls the UI module drives the viewer through
pub trait ViewerInterface {
    fn update_generation(&mut self);
    fn hash_grid(&self) -> u64;
    fn check_for_cycle(&mut self) -> bool;
    fn clear_grid(&mut self);
    fn apply_selected_pattern(&mut self);
    fn apply_text_pattern(&mut self);
    fn apply_random_pattern(&mut self);
    fn toggle_cell(&mut self, row: usize, col: usize);
    fn set_boundary(&mut self, boundary: Boundary);
}

impl Viewer {
    pub fn grid(&self) -> &Grid {
        self.engine.current_generation()
    }

    pub fn boundary(&self) -> Boundary {
        self.engine.boundary()
    }

    /// Computes the next generation with one coroutine per row. Returns
    /// `None` if any row task failed, in which case nothing is installed.
    fn next_generation_async(&self) -> Option<Grid> {
        let snapshot = Arc::new(self.engine.clone());
        let rows = snapshot.current_generation().rows();

        self.runtime.block_on(async {
            // Spawn all row coroutines simultaneously for time-slicing
            let handles: Vec<_> = (0..rows)
                .map(|row| tokio::spawn(process_row(row, Arc::clone(&snapshot))))
                .collect();

            let mut next_rows = vec![Vec::new(); rows];
            for handle in handles {
                match handle.await {
                    Ok((row_index, completed_row)) => next_rows[row_index] = completed_row,
                    Err(err) => {
                        error!("row coroutine failed: {err}");
                        return None;
                    }
                }
            }
            Grid::from_rows(&next_rows)
                .map_err(|err| error!("row coroutines produced a ragged grid: {err}"))
                .ok()
        })
    }

    fn reset_history(&mut self) {
        self.generation = 0;
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
    }

    fn load(&mut self, grid: Grid) {
        let grid = grid.centered_in(PLAYGROUND_SIZE, PLAYGROUND_SIZE);
        self.engine.replace_playground(grid);
        self.reset_history();
    }
}

impl ViewerInterface for Viewer {
    fn update_generation(&mut self) {
        if self.use_coroutines {
            match self.next_generation_async() {
                Some(next) => self.engine.replace_playground(next),
                None => {
                    self.is_running = false;
                    return;
                }
            }
        } else {
            self.engine.advance();
        }
        self.generation += 1;

        if self.check_for_cycle() {
            debug!("cycle detected at generation {}", self.generation);
            self.is_running = false;
        }
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.grid().hash(&mut hasher);
        hasher.finish()
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.hash_grid();
        if self.grid_history.contains(&current_hash) { return true; }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn clear_grid(&mut self) {
        let (rows, cols) = self.grid().dimensions();
        self.engine.replace_playground(Grid::new(rows, cols));
        self.reset_history();
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = catalog::entries().get(self.selected_pattern) {
            info!("loading catalog pattern {}", pattern.name);
            self.load(pattern.grid.clone());
            self.status = None;
        }
    }

    fn apply_text_pattern(&mut self) {
        let charset = if self.rle_dialect { Charset::RLE } else { Charset::default() };
        match decode(&self.pattern_text, &charset) {
            Ok(grid) => {
                self.load(grid);
                self.status = None;
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn apply_random_pattern(&mut self) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(self.history_count as u64, |elapsed| elapsed.as_nanos() as u64);
        let (rows, cols) = self.grid().dimensions();
        self.engine.replace_playground(catalog::random(rows, cols, seed));
        self.reset_history();
    }

    fn toggle_cell(&mut self, row: usize, col: usize) {
        let mut grid = self.grid().clone();
        grid.toggle(row, col);
        self.engine.replace_playground(grid);
    }

    fn set_boundary(&mut self, boundary: Boundary) {
        self.engine.set_boundary_mode(boundary);
    }
}
