//! Toroidal grid topology
//!
//! Cells are addressed in grid units (one unit = one sprite cell), top-left
//! origin, column on `x` and row on `y`. Rows grow downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid cell coordinate (col, row)
pub type Cell = IVec2;

/// Fixed-size grid whose edges wrap around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must be non-empty");
        Self { width, height }
    }

    /// Apply a displacement and reduce both axes modulo the grid size.
    ///
    /// Leaving one edge re-enters on the opposite edge, so there is no
    /// boundary collision.
    #[inline]
    pub fn wrap(&self, position: Cell, delta: IVec2) -> Cell {
        let moved = position + delta;
        IVec2::new(
            moved.x.rem_euclid(self.width),
            moved.y.rem_euclid(self.height),
        )
    }

    /// Whether a cell lies inside [0, width) x [0, height)
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Cell {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Iterate every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }
}

/// Membership test over any collection of cells
#[inline]
pub fn occupies<'a, I>(cells: I, cell: Cell) -> bool
where
    I: IntoIterator<Item = &'a Cell>,
{
    cells.into_iter().any(|c| *c == cell)
}
