use std::collections::TryReserveError;

use crate::domain::primitive::Cell;

/// Authoritative character content of the console, `width` x `height` cells.
///
/// Cells are stored row-major: `(col, row)` lives at `row * width + col`.
/// That offset is computed in `index` and nowhere else.
#[derive(Debug, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Allocate a grid with every cell set to `fill`.
    ///
    /// Reservation failure is reported instead of aborting, so a console that
    /// cannot get its buffer simply fails to attach.
    pub fn try_new(width: usize, height: usize, fill: Cell) -> Result<Self, TryReserveError> {
        let len = width.saturating_mul(height);
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, fill);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        self.index(col, row).and_then(|i| self.cells.get(i))
    }

    /// Store `cell` at `(col, row)`. Out-of-range positions are ignored and
    /// reported as `false`.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> bool {
        match self.index(col, row).and_then(|i| self.cells.get_mut(i)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let start = self.index(0, row)?;
        self.cells.get(start..start + self.width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Reset every cell to `fill`.
    pub fn fill(&mut self, fill: Cell) {
        self.cells.fill(fill);
    }

    /// Move every row up by one; the last row becomes `fill`.
    pub fn scroll_up(&mut self, fill: Cell) {
        if self.height == 0 {
            return;
        }
        self.cells.copy_within(self.width.., 0);
        let last = (self.height - 1) * self.width;
        self.cells[last..].fill(fill);
    }
}
