//! Grid model: the addressable 2D array of diamond cells.
//!
//! Cells are stored row-major. A cell is either empty (`None`) or holds one
//! palette color. Dimensions are fixed at construction; changing size means
//! building a new [`Grid`].

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{CanvasError, Result};

/// Nested row form used on the wire: `grid[row][col]`.
pub type Rows = Vec<Vec<Option<Rgb>>>;

/// Grid dimensions in cells. Both edges come from [`GridSize::SUPPORTED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize")]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Deserialize)]
struct RawGridSize {
    width: usize,
    height: usize,
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = CanvasError;

    fn try_from(raw: RawGridSize) -> Result<Self> {
        Self::new(raw.width, raw.height)
    }
}

impl GridSize {
    /// Edge lengths offered by the play page and the design creator.
    pub const SUPPORTED: [usize; 6] = [10, 15, 20, 25, 30, 40];

    /// # Errors
    ///
    /// Returns [`CanvasError::UnsupportedGridSize`] for an edge outside [`GridSize::SUPPORTED`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        for edge in [width, height] {
            if !Self::SUPPORTED.contains(&edge) {
                return Err(CanvasError::UnsupportedGridSize(edge));
            }
        }
        Ok(Self { width, height })
    }

    /// # Errors
    ///
    /// Same as [`GridSize::new`].
    pub fn square(edge: usize) -> Result<Self> {
        Self::new(edge, edge)
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.width * self.height
    }

    /// The longer edge; cell pitch is derived from it.
    #[must_use]
    pub fn max_edge(self) -> usize {
        self.width.max(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { width: 20, height: 20 }
    }
}

/// A cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Option<Rgb>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

impl Grid {
    /// A fresh grid with every cell empty.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self { size, cells: vec![None; size.total()] }
    }

    /// Build from a row-major cell vector.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SnapshotShape`] when the length does not match `size`.
    pub fn from_cells(size: GridSize, cells: Vec<Option<Rgb>>) -> Result<Self> {
        if cells.len() != size.total() {
            return Err(CanvasError::SnapshotShape { width: size.width, height: size.height });
        }
        Ok(Self { size, cells })
    }

    /// Build from the nested persisted form.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SnapshotShape`] on a missing or ragged row.
    pub fn from_rows(size: GridSize, rows: &[Vec<Option<Rgb>>]) -> Result<Self> {
        if rows.len() != size.height || rows.iter().any(|row| row.len() != size.width) {
            return Err(CanvasError::SnapshotShape { width: size.width, height: size.height });
        }
        let cells = rows.iter().flatten().copied().collect();
        Ok(Self { size, cells })
    }

    #[must_use]
    pub fn to_rows(&self) -> Rows {
        self.cells.chunks(self.size.width).map(<[Option<Rgb>]>::to_vec).collect()
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.size.height
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size.height && col < self.size.width
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if self.contains(row, col) {
            Ok(row * self.size.width + col)
        } else {
            Err(CanvasError::OutOfBounds { row, col, width: self.size.width, height: self.size.height })
        }
    }

    /// Cell state, or `None` for an empty or out-of-range cell.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if self.contains(row, col) { self.cells[row * self.size.width + col] } else { None }
    }

    /// Paint (`Some`) or erase (`None`) one cell. Returns whether the cell changed.
    ///
    /// # Errors
    ///
    /// [`CanvasError::OutOfBounds`] when `row >= height` or `col >= width`.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<Rgb>) -> Result<bool> {
        let i = self.index(row, col)?;
        let changed = self.cells[i] != value;
        self.cells[i] = value;
        Ok(changed)
    }

    /// Row-major snapshot of every cell.
    #[must_use]
    pub fn cells(&self) -> &[Option<Rgb>] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Option<Rgb>)> + '_ {
        let width = self.size.width;
        self.cells.iter().enumerate().map(move |(i, &c)| (Cell::new(i / width, i % width), c))
    }

    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Empty every cell. Returns whether anything was painted.
    pub fn clear(&mut self) -> bool {
        let had_paint = !self.is_blank();
        self.cells.fill(None);
        had_paint
    }

    /// Replace the 4-connected region sharing the start cell's state with `value`.
    /// Returns the number of cells changed.
    ///
    /// # Errors
    ///
    /// [`CanvasError::OutOfBounds`] when the start cell is outside the grid.
    pub fn flood_fill(&mut self, row: usize, col: usize, value: Option<Rgb>) -> Result<usize> {
        let start = self.index(row, col)?;
        let target = self.cells[start];
        if target == value {
            return Ok(0);
        }

        let (width, height) = (self.size.width, self.size.height);
        let mut queue = VecDeque::from([Cell::new(row, col)]);
        self.cells[start] = value;
        let mut changed = 1;

        while let Some(cell) = queue.pop_front() {
            let mut neighbors = Vec::with_capacity(4);
            if cell.row > 0 {
                neighbors.push(Cell::new(cell.row - 1, cell.col));
            }
            if cell.row + 1 < height {
                neighbors.push(Cell::new(cell.row + 1, cell.col));
            }
            if cell.col > 0 {
                neighbors.push(Cell::new(cell.row, cell.col - 1));
            }
            if cell.col + 1 < width {
                neighbors.push(Cell::new(cell.row, cell.col + 1));
            }
            for next in neighbors {
                let i = next.row * width + next.col;
                if self.cells[i] == target {
                    self.cells[i] = value;
                    changed += 1;
                    queue.push_back(next);
                }
            }
        }
        Ok(changed)
    }
}
