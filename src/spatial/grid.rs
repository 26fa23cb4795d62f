//! Regular cell lattices laid over the canvas
//!
//! Grid-based modes enumerate candidate cells through a [`CellGrid`] and mark
//! the ones that actually received a module, so reports can say exactly how
//! many cells were considered and how many were populated.

use ndarray::Array2;

/// Row-major lattice of `spacing`-sized cells with an occupancy map
///
/// The lattice has `floor(width / spacing)` columns and
/// `floor(height / spacing)` rows; partial cells at the right and bottom edges
/// are not candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    spacing: u32,
    occupancy: Array2<bool>,
}

impl CellGrid {
    /// Lay a lattice with the given cell spacing over a `width × height` area
    ///
    /// A zero spacing produces an empty lattice.
    pub fn over(width: u32, height: u32, spacing: u32) -> Self {
        let cols = width.checked_div(spacing).unwrap_or(0) as usize;
        let rows = height.checked_div(spacing).unwrap_or(0) as usize;
        Self {
            spacing,
            occupancy: Array2::from_elem((rows, cols), false),
        }
    }

    /// Cell spacing in pixels
    pub const fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.occupancy.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.occupancy.ncols()
    }

    /// Number of candidate cells before any filtering
    pub fn candidate_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Top-left pixel of a cell
    pub fn origin(&self, row: usize, col: usize) -> (i64, i64) {
        let spacing = i64::from(self.spacing);
        (col as i64 * spacing, row as i64 * spacing)
    }

    /// Center pixel of a cell
    pub fn center(&self, row: usize, col: usize) -> (i64, i64) {
        let (x, y) = self.origin(row, col);
        let half = i64::from(self.spacing / 2);
        (x + half, y + half)
    }

    /// Record that a cell received a module
    pub fn mark(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.occupancy.get_mut((row, col)) {
            *cell = true;
        }
    }

    /// Whether a cell received a module
    pub fn is_populated(&self, row: usize, col: usize) -> bool {
        self.occupancy.get((row, col)).copied().unwrap_or(false)
    }

    /// Number of cells that received a module
    pub fn populated_count(&self) -> usize {
        self.occupancy.iter().filter(|&&cell| cell).count()
    }

    /// Occupancy map indexed by `(row, col)`
    pub const fn occupancy(&self) -> &Array2<bool> {
        &self.occupancy
    }
}
