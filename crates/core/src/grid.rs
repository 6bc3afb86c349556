//! Grid module - fixed-size cell storage shared by both games
//!
//! A grid is W columns x H rows of integer cells held in one contiguous
//! row-major array, so copies, equality and reset are plain value operations.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom). Signed coordinates are accepted everywhere so callers can
//! probe outside the grid without casting.

use arrayvec::ArrayVec;

use crate::types::{Cell, EMPTY, FIELD_HEIGHT, FIELD_WIDTH, PREVIEW_SIZE};

/// W x H integer grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<const W: usize, const H: usize> {
    /// Row-major cells, `rows[y][x]`
    rows: [[Cell; W]; H],
}

/// The 10x20 play field
pub type Field = Grid<FIELD_WIDTH, FIELD_HEIGHT>;

/// The 4x4 next-shape preview
pub type Preview = Grid<PREVIEW_SIZE, PREVIEW_SIZE>;

impl<const W: usize, const H: usize> Grid<W, H> {
    /// Create a new empty grid
    pub const fn new() -> Self {
        Self {
            rows: [[EMPTY; W]; H],
        }
    }

    /// Create from explicit rows
    pub const fn from_rows(rows: [[Cell; W]; H]) -> Self {
        Self { rows }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= H {
            return None;
        }
        Some((x as usize, y as usize))
    }

    pub const fn width(&self) -> usize {
        W
    }

    pub const fn height(&self) -> usize {
        H
    }

    /// Whether (x, y) lies inside the grid
    pub fn contains(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some()
    }

    /// Get cell at (x, y); None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// In bounds and non-empty
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    pub fn rows(&self) -> &[[Cell; W]; H] {
        &self.rows
    }

    pub fn row(&self, y: usize) -> Option<&[Cell; W]> {
        self.rows.get(y)
    }

    /// Iterate `(x, y, value)` over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &c)| (x as i32, y as i32, c))
        })
    }

    /// First cell (row-major) matching the predicate
    pub fn find(&self, mut pred: impl FnMut(Cell) -> bool) -> Option<(i32, i32)> {
        self.cells()
            .find(|&(_, _, c)| pred(c))
            .map(|(x, y, _)| (x, y))
    }

    /// Number of cells matching the predicate
    pub fn count(&self, mut pred: impl FnMut(Cell) -> bool) -> usize {
        self.cells().filter(|&(_, _, c)| pred(c)).count()
    }

    /// Apply `f` to every cell in place
    pub fn map_in_place(&mut self, mut f: impl FnMut(Cell) -> Cell) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                *cell = f(*cell);
            }
        }
    }

    /// No empty cell remains
    pub fn is_full(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&c| c != EMPTY))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|&c| c != EMPTY))
    }

    /// Remove every full row, shifting the rows above down.
    ///
    /// Rows are scanned bottom to top; each removal pulls everything above it
    /// down by one and blanks the top row. Returns the original indices of the
    /// removed rows, bottom first.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, H> {
        let mut cleared = ArrayVec::new();
        let mut write_y = H;

        for read_y in (0..H).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    self.rows[write_y] = self.rows[read_y];
                }
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = [EMPTY; W];
        }

        cleared
    }

    /// Zero every cell
    pub fn clear(&mut self) {
        self.rows = [[EMPTY; W]; H];
    }
}

impl<const W: usize, const H: usize> Default for Grid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
