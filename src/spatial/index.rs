use crate::error::MapError;
use crate::spatial::GridExtents;

/// Row/column of a cell, row 0 at the top edge, column 0 at the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Row from the top edge.
    pub row: usize,
    /// Column from the left edge.
    pub col: usize,
}

impl CellCoord {
    /// Cell at `row`, `col`.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major storage index of `(row, col)`.
///
/// Every grid access goes through here. Negative input fails with
/// `NegativeIndex` instead of falling back to slot 0.
pub fn index_of(row: i64, col: i64, extents: &GridExtents) -> Result<usize, MapError> {
    if row < 0 || col < 0 {
        return Err(MapError::NegativeIndex { row, col });
    }
    let rows = extents.rows();
    let cols = extents.cols();
    if row as u64 >= rows as u64 || col as u64 >= cols as u64 {
        return Err(MapError::OutOfRange {
            row,
            col,
            rows,
            cols,
        });
    }
    Ok(row as usize * cols + col as usize)
}

/// Storage index of an already-unsigned coordinate.
#[inline]
pub fn index_of_coord(coord: CellCoord, extents: &GridExtents) -> Result<usize, MapError> {
    index_of(coord.row as i64, coord.col as i64, extents)
}

/// Inverse of [`index_of`]; `None` past the end of storage.
pub fn coord_of(index: usize, extents: &GridExtents) -> Option<CellCoord> {
    if !matches!(extents.cell_count(), Some(count) if index < count) {
        return None;
    }
    let cols = extents.cols();
    Some(CellCoord::new(index / cols, index % cols))
}
