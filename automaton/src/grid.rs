// grid.rs - Grid type shared by the decoder and the engine

use std::fmt;

use crate::error::{AutomatonError, Result};

/// How an external intensity matrix is reduced to alive/dead cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threshold {
    /// Alive when strictly greater than half of the matrix's own maximum.
    #[default]
    Midpoint,
    /// Alive when strictly greater than the given value.
    Fixed(u8),
}

/// A rectangular generation of binary cells, stored row-major.
///
/// Dimensions never change after construction. Anything that needs a
/// different shape builds a new `Grid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// An all-dead grid, or `MalformedPattern` if `rows * cols` cells cannot
    /// be allocated.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        let area = rows.checked_mul(cols).ok_or_else(|| {
            AutomatonError::MalformedPattern(format!("{}x{} grid is too large", rows, cols))
        })?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(area).map_err(|err| {
            AutomatonError::MalformedPattern(format!("{}x{} grid: {}", rows, cols, err))
        })?;
        cells.resize(area, false);
        Ok(Self { rows, cols, cells })
    }

    /// Builds a grid from rows of cells. Every row must have the same length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(AutomatonError::MalformedPattern(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    cols
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Thresholds an intensity matrix (e.g. a greyscale image) into a grid.
    pub fn from_intensities<R: AsRef<[u8]>>(matrix: &[R], threshold: Threshold) -> Result<Self> {
        let cutoff = match threshold {
            Threshold::Fixed(value) => value,
            Threshold::Midpoint => {
                let max = matrix
                    .iter()
                    .flat_map(|row| row.as_ref().iter().copied())
                    .max()
                    .unwrap_or(0);
                max / 2
            }
        };
        let rows: Vec<Vec<bool>> = matrix
            .iter()
            .map(|row| row.as_ref().iter().map(|&v| v > cutoff).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Renders the grid as 0/`alive` intensities for display code.
    pub fn to_intensities(&self, alive: u8) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|&cell| if cell { alive } else { 0 }).collect())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell state, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Cell state, with everything outside the grid reported dead.
    pub fn is_alive(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.get(row as usize, col as usize).unwrap_or(false)
    }

    /// Sets a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = alive;
        }
    }

    /// Flips a cell. Out-of-range coordinates are ignored.
    pub fn toggle(&mut self, row: usize, col: usize) {
        if let Some(alive) = self.get(row, col) {
            self.set(row, col, !alive);
        }
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // chunks() rejects a zero chunk size
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Coordinates `(row, col)` of every living cell, row-major.
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell)
            .map(|(index, _)| (index / self.cols, index % self.cols))
            .collect()
    }

    /// A copy surrounded by dead margins of the given widths.
    pub fn padded(&self, top: usize, bottom: usize, left: usize, right: usize) -> Self {
        let mut out = Self::new(self.rows + top + bottom, self.cols + left + right);
        for (row, cells) in self.iter_rows().enumerate() {
            let start = (row + top) * out.cols + left;
            out.cells[start..start + self.cols].copy_from_slice(cells);
        }
        out
    }

    /// Places this grid in the middle of a dead playground of at least
    /// `rows` x `cols` cells.
    pub fn centered_in(&self, rows: usize, cols: usize) -> Self {
        let extra_rows = rows.saturating_sub(self.rows);
        let extra_cols = cols.saturating_sub(self.cols);
        self.padded(
            extra_rows / 2,
            extra_rows - extra_rows / 2,
            extra_cols / 2,
            extra_cols - extra_cols / 2,
        )
    }

    /// True when the outermost ring of cells is entirely dead.
    pub fn border_is_dead(&self) -> bool {
        if self.rows == 0 || self.cols == 0 {
            return true;
        }
        let last_row = self.rows - 1;
        let last_col = self.cols - 1;
        !self.row(0).iter().any(|&c| c)
            && !self.row(last_row).iter().any(|&c| c)
            && (0..self.rows).all(|row| {
                !self.cells[row * self.cols] && !self.cells[row * self.cols + last_col]
            })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(matches!(
            Grid::from_rows(&rows),
            Err(AutomatonError::MalformedPattern(_))
        ));
    }

    #[test]
    fn unallocatable_grid_is_an_error() {
        assert!(matches!(
            Grid::try_new(usize::MAX, 2),
            Err(AutomatonError::MalformedPattern(_))
        ));
        assert!(matches!(
            Grid::try_new(usize::MAX / 2, 1),
            Err(AutomatonError::MalformedPattern(_))
        ));
        assert_eq!(Grid::try_new(3, 4).unwrap(), Grid::new(3, 4));
    }

    #[test]
    fn midpoint_threshold_uses_matrix_maximum() {
        let matrix = vec![vec![0u8, 10, 20], vec![11, 9, 5]];
        let grid = Grid::from_intensities(&matrix, Threshold::Midpoint).unwrap();
        assert_eq!(grid.row(0), &[false, false, true]);
        assert_eq!(grid.row(1), &[true, false, false]);
    }

    #[test]
    fn fixed_threshold_matches_byte_images() {
        let matrix = vec![vec![127u8, 128, 255]];
        let grid = Grid::from_intensities(&matrix, Threshold::Fixed(127)).unwrap();
        assert_eq!(grid.row(0), &[false, true, true]);
        assert_eq!(grid.to_intensities(255), vec![vec![0, 255, 255]]);
    }

    #[test]
    fn padding_keeps_cells_in_place() {
        let grid = Grid::from_rows(&[[true, true]]).unwrap();
        let padded = grid.padded(1, 2, 3, 0);
        assert_eq!(padded.dimensions(), (4, 5));
        assert_eq!(padded.living_cells(), vec![(1, 3), (1, 4)]);
        assert!(!padded.border_is_dead());
        assert!(grid.padded(1, 1, 1, 1).border_is_dead());
    }

    #[test]
    fn centering_splits_margins() {
        let grid = Grid::from_rows(&[[true]]).unwrap();
        let centered = grid.centered_in(4, 5);
        assert_eq!(centered.dimensions(), (4, 5));
        assert_eq!(centered.living_cells(), vec![(1, 2)]);
    }

    #[test]
    fn out_of_range_reads_are_dead() {
        let mut grid = Grid::new(2, 2);
        grid.toggle(1, 1);
        assert!(grid.is_alive(1, 1));
        assert!(!grid.is_alive(-1, 1));
        assert!(!grid.is_alive(2, 0));
        assert_eq!(grid.get(5, 5), None);
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.to_string(), "..\n.#\n");
    }
}
