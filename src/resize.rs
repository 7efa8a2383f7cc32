//! Directional grow/shrink of a [`TileGrid`].
//!
//! Up and Down add or remove whole rows at the top or bottom; Left and Right
//! add or remove one cell per row at the start or end of every row. Existing
//! tiles keep their place relative to the origin.

use crate::map::{GridObserver, TileGrid, MAX_CELL_COUNT};
use crate::spatial::Direction;
use std::iter;
use tracing::{debug, warn};

impl TileGrid {
    /// Adds `count` empty rows/columns on the `direction` edge.
    ///
    /// Growth stops at [`MAX_CELL_COUNT`] cells; a limited grow logs a
    /// warning. Returns the number added.
    pub fn grow(&mut self, direction: Direction, count: u32, observer: &mut dyn GridObserver) -> u32 {
        let room = self.growth_room(direction);
        let added = count.min(room);
        if added < count {
            warn!(
                %direction,
                requested = count,
                applied = added,
                "grow_limited_to_max_cells"
            );
        }
        if added == 0 {
            return 0;
        }
        let n = added as usize;
        let cols = self.cols();
        match direction {
            Direction::Up => {
                self.cells.splice(0..0, iter::repeat(None).take(n * cols));
            }
            Direction::Down => {
                let len = self.cells.len() + n * cols;
                self.cells.resize(len, None);
            }
            Direction::Left | Direction::Right => {
                let at_left = direction == Direction::Left;
                let mut out = Vec::with_capacity(self.rows() * (cols + n));
                for row in self.cells.chunks_exact(cols) {
                    if at_left {
                        out.extend(iter::repeat(None).take(n));
                    }
                    out.extend_from_slice(row);
                    if !at_left {
                        out.extend(iter::repeat(None).take(n));
                    }
                }
                self.cells = out;
            }
        }
        *self.extents.get_mut(direction) += added;
        self.finish_resize(direction, observer);
        added
    }

    /// Rows/columns that fit on `direction` before the extent or the cell
    /// limit would overflow.
    fn growth_room(&self, direction: Direction) -> u32 {
        let across = if direction.is_vertical() {
            self.cols()
        } else {
            self.rows()
        };
        let max_span = MAX_CELL_COUNT / across.max(1);
        let by_cells = max_span.saturating_sub(self.extents.span(direction));
        let by_extent = u32::MAX - self.extents.get(direction);
        u32::try_from(by_cells).unwrap_or(u32::MAX).min(by_extent)
    }

    /// Removes up to `count` rows/columns from the `direction` edge.
    ///
    /// Never removes more than that side holds. When the removal would leave
    /// zero rows (or columns) it removes one fewer and logs a warning.
    /// Returns the number actually removed.
    pub fn shrink(&mut self, direction: Direction, count: u32, observer: &mut dyn GridObserver) -> u32 {
        let current = self.extents.get(direction);
        let mut removed = count.min(current);
        if removed as usize >= self.extents.span(direction) {
            removed = removed.saturating_sub(1);
            warn!(
                %direction,
                requested = count,
                applied = removed,
                "shrink_reduced_to_keep_dimension"
            );
        }
        if removed == 0 {
            return 0;
        }

        let n = removed as usize;
        let cols = self.cols();
        match direction {
            Direction::Up => {
                self.cells.drain(..n * cols);
            }
            Direction::Down => {
                let len = self.cells.len() - n * cols;
                self.cells.truncate(len);
            }
            Direction::Left | Direction::Right => {
                let keep = cols - n;
                let mut out = Vec::with_capacity(self.rows() * keep);
                for row in self.cells.chunks_exact(cols) {
                    let kept = if direction == Direction::Left {
                        &row[n..]
                    } else {
                        &row[..keep]
                    };
                    out.extend_from_slice(kept);
                }
                self.cells = out;
            }
        }
        *self.extents.get_mut(direction) -= removed;
        self.finish_resize(direction, observer);
        removed
    }

    /// Grows (`delta > 0`) or shrinks (`delta < 0`) the `direction` edge.
    ///
    /// Returns that edge's extent after the change.
    pub fn resize(&mut self, direction: Direction, delta: i64, observer: &mut dyn GridObserver) -> u32 {
        let magnitude = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        if delta > 0 {
            self.grow(direction, magnitude, observer);
        } else if delta < 0 {
            self.shrink(direction, magnitude, observer);
        }
        self.extents.get(direction)
    }

    /// Moves the `direction` edge so that it holds `new_value` tiles.
    ///
    /// Zero removes everything on that side (subject to the one-row/column
    /// floor) and negative values count as zero. Returns the extent actually
    /// applied so a caller can show it instead of the requested value; `None`
    /// means no direction was given and nothing changed.
    pub fn determine_change(
        &mut self,
        new_value: i64,
        direction: Option<Direction>,
        observer: &mut dyn GridObserver,
    ) -> Option<u32> {
        let Some(direction) = direction else {
            warn!(new_value, "resize_without_direction_ignored");
            return None;
        };
        let new_value = if new_value < 0 {
            warn!(%direction, new_value, "negative_extent_clamped");
            0
        } else {
            new_value
        };

        let current = self.extents.get(direction);
        if new_value == 0 {
            self.shrink(direction, current, observer);
            return Some(self.extents.get(direction));
        }

        let delta = new_value - current as i64;
        Some(self.resize(direction, delta, observer))
    }

    fn finish_resize(&mut self, direction: Direction, observer: &mut dyn GridObserver) {
        debug_assert_eq!(Some(self.cells.len()), self.extents.cell_count());
        debug!(
            %direction,
            rows = self.rows(),
            cols = self.cols(),
            "grid_resized"
        );
        observer.grid_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ChangeLog;
    use crate::spatial::GridExtents;
    use crate::tile::{AtlasCoord, TileRecord};

    fn tile(n: u32) -> Option<TileRecord> {
        Some(TileRecord::new(AtlasCoord::new(n, 0)))
    }

    /// Grid whose cell `i` holds a tile with atlas x `i`.
    fn numbered(extents: GridExtents) -> TileGrid {
        let cells = (0..extents.cell_count().unwrap() as u32).map(tile).collect();
        TileGrid::from_parts(extents, 16, 1.0, cells).unwrap()
    }

    #[test]
    fn grow_up_pushes_rows_down() {
        let mut grid = numbered(GridExtents::new(1, 0, 1, 1));
        let mut log = ChangeLog::default();

        assert_eq!(grid.resize(Direction::Up, 2, &mut log), 3);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.cells(), &[None, None, None, None, tile(0), tile(1)]);
        assert_eq!(log.grid_changes, 1);
    }

    #[test]
    fn grow_down_appends_rows() {
        let mut grid = numbered(GridExtents::new(1, 0, 1, 1));
        grid.grow(Direction::Down, 1, &mut ());
        assert_eq!(grid.extents(), GridExtents::new(1, 1, 1, 1));
        assert_eq!(grid.cells(), &[tile(0), tile(1), None, None]);
    }

    #[test]
    fn grow_left_and_right_pad_every_row() {
        let mut grid = numbered(GridExtents::new(1, 1, 0, 1));
        grid.grow(Direction::Left, 1, &mut ());
        assert_eq!(grid.cells(), &[None, tile(0), None, tile(1)]);
        grid.grow(Direction::Right, 2, &mut ());
        assert_eq!(
            grid.cells(),
            &[None, tile(0), None, None, None, tile(1), None, None]
        );
        assert_eq!(grid.extents(), GridExtents::new(1, 1, 1, 3));
    }

    #[test]
    fn shrink_removes_from_the_named_edge() {
        let mut grid = numbered(GridExtents::new(2, 1, 1, 2));
        // rows: [0 1 2] [3 4 5] [6 7 8]
        assert_eq!(grid.shrink(Direction::Up, 1, &mut ()), 1);
        assert_eq!(grid.cells(), &[tile(3), tile(4), tile(5), tile(6), tile(7), tile(8)]);
        assert_eq!(grid.shrink(Direction::Right, 1, &mut ()), 1);
        assert_eq!(grid.cells(), &[tile(3), tile(4), tile(6), tile(7)]);
        assert_eq!(grid.shrink(Direction::Left, 1, &mut ()), 1);
        assert_eq!(grid.cells(), &[tile(4), tile(7)]);
        assert_eq!(grid.shrink(Direction::Down, 1, &mut ()), 1);
        assert_eq!(grid.cells(), &[tile(4)]);
        assert_eq!(grid.extents(), GridExtents::new(1, 0, 0, 1));
    }

    #[test]
    fn shrink_is_clamped_to_what_is_there() {
        let mut grid = numbered(GridExtents::new(3, 2, 1, 1));
        assert_eq!(grid.shrink(Direction::Down, 10, &mut ()), 2);
        assert_eq!(grid.extents().down, 0);
        assert_eq!(grid.len(), grid.rows() * grid.cols());
    }

    #[test]
    fn shrink_never_zeroes_a_dimension() {
        let mut grid = numbered(GridExtents::new(3, 0, 1, 1));
        assert_eq!(grid.shrink(Direction::Up, 3, &mut ()), 2);
        assert_eq!(grid.extents().up, 1);
        assert_eq!(grid.rows(), 1);

        let mut log = ChangeLog::default();
        assert_eq!(grid.shrink(Direction::Up, 1, &mut log), 0);
        assert_eq!(log.grid_changes, 0);
        assert_eq!(grid.rows(), 1);
    }

    #[test]
    fn shrinking_an_empty_side_is_a_no_op() {
        let mut grid = numbered(GridExtents::new(1, 0, 1, 1));
        let before = grid.clone();
        assert_eq!(grid.resize(Direction::Down, -1, &mut ()), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn grow_then_shrink_restores_the_grid() {
        let original = numbered(GridExtents::new(1, 2, 2, 1));
        for direction in Direction::ALL {
            let mut grid = original.clone();
            grid.resize(direction, 3, &mut ());
            grid.resize(direction, -3, &mut ());
            assert_eq!(grid, original, "round trip through {direction}");
        }
    }

    #[test]
    fn determine_change_returns_the_applied_extent() {
        let mut grid = numbered(GridExtents::new(1, 0, 1, 1));
        assert_eq!(grid.determine_change(4, Some(Direction::Up), &mut ()), Some(4));
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.determine_change(2, Some(Direction::Up), &mut ()), Some(2));
        assert_eq!(grid.rows(), 2);
        // zero would leave no rows, so one stays
        assert_eq!(grid.determine_change(0, Some(Direction::Up), &mut ()), Some(1));
        // negative counts as zero; the right column keeps the grid alive
        assert_eq!(grid.determine_change(-5, Some(Direction::Left), &mut ()), Some(0));
        assert_eq!(grid.extents(), GridExtents::new(1, 0, 0, 1));
    }

    #[test]
    fn determine_change_to_zero_removes_the_side() {
        let mut grid = numbered(GridExtents::new(2, 3, 1, 1));
        assert_eq!(grid.determine_change(0, Some(Direction::Down), &mut ()), Some(0));
        assert_eq!(grid.extents(), GridExtents::new(2, 0, 1, 1));
        assert_eq!(grid.cells(), &[tile(0), tile(1), tile(2), tile(3)]);
    }

    #[test]
    fn missing_direction_is_ignored() {
        let mut grid = numbered(GridExtents::new(1, 0, 1, 1));
        let mut log = ChangeLog::default();
        assert_eq!(grid.determine_change(3, None, &mut log), None);
        assert_eq!(grid.extents(), GridExtents::new(1, 0, 1, 1));
        assert_eq!(log.grid_changes, 0);
    }

    #[test]
    fn huge_requests_stop_at_the_cell_limit() {
        let mut grid = TileGrid::default();
        let mut log = ChangeLog::default();
        let applied = grid.determine_change(5_000_000_000, Some(Direction::Up), &mut log);
        assert_eq!(applied, Some(MAX_CELL_COUNT as u32));
        assert_eq!(grid.len(), MAX_CELL_COUNT);
        assert_eq!(log.grid_changes, 1);

        // full: nothing more fits on any side
        assert_eq!(grid.grow(Direction::Right, 1, &mut log), 0);
        assert_eq!(grid.grow(Direction::Down, u32::MAX, &mut log), 0);
        assert_eq!(grid.len(), grid.rows() * grid.cols());
        assert_eq!(log.grid_changes, 1);
    }

    #[test]
    fn grow_is_limited_across_the_other_dimension() {
        let mut grid = TileGrid::new(GridExtents::new(1 << 19, 0, 0, 1), 16, 1.0).unwrap();
        assert_eq!(grid.grow(Direction::Left, 10, &mut ()), 1);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.len(), MAX_CELL_COUNT);
    }

    #[test]
    fn invariant_holds_over_mixed_sequences() {
        let mut grid = TileGrid::default();
        let steps: [(Direction, i64); 10] = [
            (Direction::Left, 3),
            (Direction::Down, 2),
            (Direction::Up, -1),
            (Direction::Right, -5),
            (Direction::Up, 4),
            (Direction::Left, -2),
            (Direction::Down, -9),
            (Direction::Right, 1),
            (Direction::Up, -10),
            (Direction::Left, -10),
        ];
        for (direction, delta) in steps {
            grid.resize(direction, delta, &mut ());
            assert_eq!(grid.len(), grid.rows() * grid.cols());
            assert!(grid.rows() >= 1 && grid.cols() >= 1);
        }
    }
}
