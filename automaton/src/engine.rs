// engine.rs - Generation-by-generation evolution of a Grid

use log::{debug, trace};

use crate::config::{Boundary, Config};
use crate::error::{AutomatonError, Result};
use crate::grid::Grid;
use crate::rule::RuleTable;

/// Owns the current generation and the rule it evolves under.
///
/// The grid is only ever replaced whole: `advance()` builds the next
/// generation from a snapshot of the current one and swaps it in once every
/// cell has been evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    grid: Grid,
    rule: RuleTable,
    boundary: Boundary,
    generation: u64,
}

impl Automaton {
    /// Radius 1, Conway's rule, bounded edges.
    pub fn new(grid: Grid) -> Self {
        debug!("automaton {}x{} with default config", grid.rows(), grid.cols());
        Self {
            grid,
            rule: RuleTable::conway(),
            boundary: Boundary::Bounded,
            generation: 0,
        }
    }

    pub fn with_config(grid: Grid, config: Config) -> Result<Self> {
        let (rule, boundary) = config.validate()?;
        debug!(
            "automaton {}x{} radius {} rule {} {:?}",
            grid.rows(),
            grid.cols(),
            rule.radius(),
            rule,
            boundary
        );
        Ok(Self {
            grid,
            rule,
            boundary,
            generation: 0,
        })
    }

    pub fn radius(&self) -> usize {
        self.rule.radius()
    }

    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Generations advanced since construction or the last playground swap.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only view of the current generation.
    pub fn current_generation(&self) -> &Grid {
        &self.grid
    }

    /// Living cells in the window around `(x, y)` (row, column), not
    /// counting `(x, y)` itself. Defined for every coordinate.
    pub fn count_living_neighbors(&self, x: isize, y: isize) -> usize {
        let r = self.radius() as isize;
        let (rows, cols) = (self.grid.rows() as isize, self.grid.cols() as isize);
        if rows == 0 || cols == 0 {
            return 0;
        }

        match self.boundary {
            Boundary::Bounded => {
                let top = x.saturating_sub(r).max(0);
                let bottom = x.saturating_add(r + 1).min(rows);
                let left = y.saturating_sub(r).max(0);
                let right = y.saturating_add(r + 1).min(cols);
                let mut count = 0;
                for i in top..bottom {
                    let row = self.grid.row(i as usize);
                    for j in left..right {
                        count += row[j as usize] as usize;
                    }
                }
                count - self.grid.is_alive(x, y) as usize
            }
            Boundary::Toroidal => {
                let (cx, cy) = (x.rem_euclid(rows), y.rem_euclid(cols));
                let mut count = 0;
                for di in -r..=r {
                    let row = self.grid.row((cx + di).rem_euclid(rows) as usize);
                    for dj in -r..=r {
                        count += row[(cy + dj).rem_euclid(cols) as usize] as usize;
                    }
                }
                count - self.grid.is_alive(cx, cy) as usize
            }
        }
    }

    /// State of `(row, col)` in the next generation.
    #[inline]
    pub fn next_state(&self, row: usize, col: usize) -> bool {
        let count = self.count_living_neighbors(row as isize, col as isize);
        let alive = self.grid.get(row, col).unwrap_or(false);
        self.rule.lookup(count).apply(alive)
    }

    /// One row of the next generation, computed from the current snapshot.
    pub fn next_row(&self, row: usize) -> Vec<bool> {
        (0..self.grid.cols()).map(|col| self.next_state(row, col)).collect()
    }

    /// The next generation, without installing it.
    pub fn next_generation(&self) -> Grid {
        let mut next = Grid::new(self.grid.rows(), self.grid.cols());
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                next.set(row, col, self.next_state(row, col));
            }
        }
        next
    }

    /// Computes and installs the next generation.
    pub fn advance(&mut self) {
        let next = self.next_generation();
        self.grid = next;
        self.generation += 1;
        trace!(
            "generation {} population {}",
            self.generation,
            self.grid.population()
        );
    }

    /// Advances `n` generations.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Swaps in a new grid, possibly of different dimensions, and resets the
    /// generation counter.
    pub fn replace_playground(&mut self, grid: Grid) {
        debug!(
            "replacing {}x{} playground with {}x{}",
            self.grid.rows(),
            self.grid.cols(),
            grid.rows(),
            grid.cols()
        );
        self.grid = grid;
        self.generation = 0;
    }

    pub fn set_boundary_mode(&mut self, boundary: Boundary) {
        debug!("boundary {:?} -> {:?}", self.boundary, boundary);
        self.boundary = boundary;
    }

    /// Swaps the rule table. The table must be sized for the current radius;
    /// use [`Automaton::reconfigure`] to change radius.
    pub fn set_rule(&mut self, rule: RuleTable) -> Result<()> {
        if rule.radius() != self.radius() {
            return Err(AutomatonError::DimensionMismatch {
                engine_radius: self.radius(),
                rule_radius: rule.radius(),
            });
        }
        self.rule = rule;
        Ok(())
    }

    /// Replaces radius, rule and boundary together. Leaves the engine
    /// untouched if the configuration is invalid.
    pub fn reconfigure(&mut self, config: Config) -> Result<()> {
        let (rule, boundary) = config.validate()?;
        debug!("reconfigured: radius {} rule {} {:?}", rule.radius(), rule, boundary);
        self.rule = rule;
        self.boundary = boundary;
        Ok(())
    }
}
