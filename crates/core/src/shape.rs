//! Shape module - puzzle pieces and their simple rotation
//!
//! A shape is a bitmap of at most 4x4 cells plus an anchor on the field.
//! Rotation is a plain 90 degree transpose-with-reversal of the bitmap; there
//! are no per-orientation tables and no wall kicks.
//!
//! Anchor convention: `x` is the field column of the bitmap's left edge and
//! `y` is the field row of the bitmap's *bottom* row, so bitmap row `i` sits
//! at field row `y - (height - 1 - i)`. Spawning at `y = 0` therefore lets a
//! piece slide in from above the field.

use crate::grid::Preview;
use crate::types::{Cell, EMPTY, PREVIEW_SIZE};

/// Marker stored in occupied shape and settled field cells
pub const FILLED: Cell = 1;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// 4-cell bar
    Stick,
    /// 2x2 square
    Square,
    T,
    L,
    /// Mirrored L
    LRev,
    Z,
    /// Mirrored Z
    ZRev,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Stick,
        ShapeKind::Square,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::LRev,
        ShapeKind::Z,
        ShapeKind::ZRev,
    ];

    /// Spawn bitmap rows, top row first
    fn pattern(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Stick => &["#", "#", "#", "#"],
            ShapeKind::Square => &["##", "##"],
            ShapeKind::T => &[".#.", "###"],
            ShapeKind::L => &["#..", "###"],
            ShapeKind::LRev => &["..#", "###"],
            ShapeKind::Z => &["##.", ".##"],
            ShapeKind::ZRev => &[".##", "##."],
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// A piece: bitmap, bounding box and field anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    bitmap: Preview,
    width: usize,
    height: usize,
    pub x: i32,
    pub y: i32,
}

impl Shape {
    /// Create a shape in spawn orientation anchored at (0, 0)
    pub fn new(kind: ShapeKind) -> Self {
        let pattern = kind.pattern();
        let mut bitmap = Preview::new();
        for (i, row) in pattern.iter().enumerate() {
            for (j, ch) in row.chars().enumerate() {
                if ch == '#' {
                    bitmap.set(j as i32, i as i32, FILLED);
                }
            }
        }
        Self {
            kind,
            bitmap,
            width: pattern[0].len(),
            height: pattern.len(),
            x: 0,
            y: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The bitmap, top-left aligned in a 4x4 grid
    pub fn bitmap(&self) -> &Preview {
        &self.bitmap
    }

    /// Field row of the bitmap's top row
    pub fn top(&self) -> i32 {
        self.y - (self.height as i32 - 1)
    }

    /// Field coordinates of every occupied cell (may lie outside the field)
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let top = self.top();
        self.bitmap
            .cells()
            .filter(move |&(x, y, c)| {
                c != EMPTY && (x as usize) < self.width && (y as usize) < self.height
            })
            .map(move |(j, i, _)| (self.x + j, top + i))
    }

    /// Copy of this shape moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rotate the bitmap by 90 degrees, swapping width and height.
    ///
    /// The anchor is left untouched; callers fix up the position.
    pub fn rotate(&mut self, spin: Spin) {
        let mut rotated = Preview::new();
        let (w, h) = (self.width as i32, self.height as i32);
        for i in 0..h {
            for j in 0..w {
                let Some(cell) = self.bitmap.get(j, i) else {
                    continue;
                };
                match spin {
                    // new[j][h - 1 - i] = old[i][j]
                    Spin::Clockwise => rotated.set(h - 1 - i, j, cell),
                    // new[w - 1 - j][i] = old[i][j]
                    Spin::CounterClockwise => rotated.set(i, w - 1 - j, cell),
                };
            }
        }
        self.bitmap = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
    }

    pub fn rotated(&self, spin: Spin) -> Self {
        let mut copy = *self;
        copy.rotate(spin);
        copy
    }
}

/// Largest bitmap side; bitmaps always fit the preview grid
pub const MAX_SHAPE_SIDE: usize = PREVIEW_SIZE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            assert_eq!(shape.cells().count(), 4, "{:?}", kind);
            assert!(shape.width() <= MAX_SHAPE_SIDE);
            assert!(shape.height() <= MAX_SHAPE_SIDE);
        }
    }

    #[test]
    fn test_t_clockwise_bitmap() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let t = Shape::new(ShapeKind::T).rotated(Spin::Clockwise);
        assert_eq!((t.width(), t.height()), (2, 3));
        let expected = [[1, 0], [1, 1], [1, 0]];
        for (y, row) in expected.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                assert_eq!(t.bitmap().get(x as i32, y as i32), Some(v), "({x},{y})");
            }
        }
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            assert_eq!(
                shape.rotated(Spin::Clockwise).rotated(Spin::CounterClockwise),
                shape
            );
        }
    }

    #[test]
    fn test_cells_hang_above_anchor() {
        let stick = Shape::new(ShapeKind::Stick);
        let rows: Vec<i32> = stick.cells().map(|(_, y)| y).collect();
        assert_eq!(rows, vec![-3, -2, -1, 0]);
        assert_eq!(stick.top(), -3);
    }
}
