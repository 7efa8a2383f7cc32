use crate::spatial::Direction;
use serde::{Deserialize, Serialize};

/// Tile counts on each side of the grid origin.
///
/// The origin sits on the line between the up and down halves and between the
/// left and right halves, so `rows = up + down` and `cols = left + right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridExtents {
    /// Rows above the origin.
    pub up: u32,
    /// Rows below the origin.
    pub down: u32,
    /// Columns left of the origin.
    pub left: u32,
    /// Columns right of the origin.
    pub right: u32,
}

impl GridExtents {
    /// Extents from the four side counts.
    pub const fn new(up: u32, down: u32, left: u32, right: u32) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// `up + down`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.up as usize + self.down as usize
    }

    /// `left + right`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.left as usize + self.right as usize
    }

    /// `rows * cols`, or `None` when that overflows `usize`.
    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        self.rows().checked_mul(self.cols())
    }

    /// False when either dimension has zero thickness.
    pub fn is_valid(&self) -> bool {
        self.rows() >= 1 && self.cols() >= 1
    }

    /// Count on the `direction` side.
    pub fn get(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub(crate) fn get_mut(&mut self, direction: Direction) -> &mut u32 {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Total of the dimension `direction` belongs to (rows or columns).
    pub fn span(&self, direction: Direction) -> usize {
        if direction.is_vertical() {
            self.rows()
        } else {
            self.cols()
        }
    }
}
