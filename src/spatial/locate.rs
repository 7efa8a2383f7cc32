use crate::spatial::{CellCoord, GridExtents};
use macroquad::prelude::{vec2, Rect, Vec2};

// Cells along an axis are numbered outward from the origin: 1, 2, .. on the
// positive side and -1, -2, .. on the negative side. A point on a grid line
// belongs to the cell nearer the origin; the origin line itself belongs to
// cell -1 (left of it on x, below it on y).

/// Rounds `value / cell` away from zero.
fn outward_steps(value: f32, cell: f32) -> i64 {
    let steps = value / cell;
    if steps >= 0.0 {
        steps.ceil() as i64
    } else {
        steps.floor() as i64
    }
}

/// Index counted from the negative edge of an axis with `neg` cells below the
/// origin and `pos` above it.
fn axis_index(value: f32, cell: f32, neg: u32, pos: u32) -> Option<usize> {
    let ordinal = match outward_steps(value, cell) {
        0 => -1,
        n => n,
    };
    if ordinal < -(neg as i64) || ordinal > pos as i64 {
        return None;
    }
    let from_neg = if ordinal < 0 {
        neg as i64 + ordinal
    } else {
        neg as i64 + ordinal - 1
    };
    Some(from_neg as usize)
}

/// Center of the cell `from_neg` cells in from the negative edge.
fn axis_center(from_neg: usize, cell: f32, neg: u32) -> f32 {
    (from_neg as f32 - neg as f32 + 0.5) * cell
}

/// Resolves a world position to the grid cell under it.
///
/// `origin` is the world position of the grid origin and `cell_size` the world
/// width of one cell. Positions past the extents, and degenerate cell sizes,
/// give `None`.
pub fn locate(
    world: Vec2,
    origin: Vec2,
    cell_size: f32,
    extents: &GridExtents,
) -> Option<CellCoord> {
    if !(cell_size.is_finite() && cell_size > 0.0) || !world.is_finite() {
        return None;
    }
    let local = world - origin;
    let col = axis_index(local.x, cell_size, extents.left, extents.right)?;
    // Rows count down from the top edge, the axis counts up from the bottom.
    let from_bottom = axis_index(local.y, cell_size, extents.down, extents.up)?;
    let row = extents.rows().checked_sub(from_bottom + 1)?;
    Some(CellCoord::new(row, col))
}

/// World position of the center of `coord`; `None` outside the extents.
pub fn cell_center(
    coord: CellCoord,
    origin: Vec2,
    cell_size: f32,
    extents: &GridExtents,
) -> Option<Vec2> {
    if coord.row >= extents.rows() || coord.col >= extents.cols() {
        return None;
    }
    let from_bottom = extents.rows() - 1 - coord.row;
    Some(
        origin
            + vec2(
                axis_center(coord.col, cell_size, extents.left),
                axis_center(from_bottom, cell_size, extents.down),
            ),
    )
}

/// World rectangle covered by the grid. `y` is the bottom edge.
pub fn world_bounds(origin: Vec2, cell_size: f32, extents: &GridExtents) -> Rect {
    Rect::new(
        origin.x - extents.left as f32 * cell_size,
        origin.y - extents.down as f32 * cell_size,
        extents.cols() as f32 * cell_size,
        extents.rows() as f32 * cell_size,
    )
}
