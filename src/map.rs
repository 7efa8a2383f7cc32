use crate::error::MapError;
use crate::spatial::{
    cell_center, coord_of, index_of, index_of_coord, locate, world_bounds, CellCoord, GridExtents,
};
use crate::tile::TileRecord;
use macroquad::prelude::{Rect, Vec2};
use tracing::debug;

/// Source pixel size of one tile when a map does not say.
pub const DEFAULT_TILE_PIXEL_SIZE: u32 = 32;
/// World size of one cell when a map does not say.
pub const DEFAULT_CELL_SIZE: f32 = 1.0;
/// Most cell slots a grid may hold (1024 x 1024).
pub const MAX_CELL_COUNT: usize = 1 << 20;

/// Receives change notifications so a renderer can repaint.
pub trait GridObserver {
    /// Whole-grid change (resize).
    fn grid_changed(&mut self);

    /// Single cell replaced or erased.
    fn cell_changed(&mut self, _coord: CellCoord) {}
}

impl GridObserver for () {
    fn grid_changed(&mut self) {}
}

/// Observer that records what it was told, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeLog {
    /// Whole-grid notifications received.
    pub grid_changes: usize,
    /// Changed cells, oldest first.
    pub cells: Vec<CellCoord>,
}

impl GridObserver for ChangeLog {
    fn grid_changed(&mut self) {
        self.grid_changes += 1;
    }

    fn cell_changed(&mut self, coord: CellCoord) {
        self.cells.push(coord);
    }
}

/// Rectangular tile grid addressed from a fixed origin.
///
/// Cells are stored row-major, top row first; `None` is an empty cell.
/// `cells.len() == extents.rows() * extents.cols()` holds after every call.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    pub(crate) extents: GridExtents,
    pub(crate) cells: Vec<Option<TileRecord>>,
    tile_pixel_size: u32,
    cell_size: f32,
}

impl Default for TileGrid {
    /// 1x1 map: one row above the origin, one column right of it.
    fn default() -> Self {
        Self {
            extents: GridExtents::new(1, 0, 0, 1),
            cells: vec![None],
            tile_pixel_size: DEFAULT_TILE_PIXEL_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

fn check_cell_size(cell_size: f32) -> Result<(), MapError> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(())
    } else {
        Err(MapError::InvalidCellSize(cell_size))
    }
}

/// Storage length for `extents`, checked before anything is allocated.
fn storage_len(extents: &GridExtents) -> Result<usize, MapError> {
    let (rows, cols) = (extents.rows(), extents.cols());
    if !extents.is_valid() {
        return Err(MapError::ZeroDimension { rows, cols });
    }
    match extents.cell_count() {
        Some(count) if count <= MAX_CELL_COUNT => Ok(count),
        _ => Err(MapError::GridTooLarge {
            rows,
            cols,
            max: MAX_CELL_COUNT,
        }),
    }
}

impl TileGrid {
    /// Empty grid with the given extents.
    pub fn new(extents: GridExtents, tile_pixel_size: u32, cell_size: f32) -> Result<Self, MapError> {
        let len = storage_len(&extents)?;
        Self::from_parts(extents, tile_pixel_size, cell_size, vec![None; len])
    }

    /// Grid over existing row-major storage.
    pub fn from_parts(
        extents: GridExtents,
        tile_pixel_size: u32,
        cell_size: f32,
        cells: Vec<Option<TileRecord>>,
    ) -> Result<Self, MapError> {
        let expected = storage_len(&extents)?;
        check_cell_size(cell_size)?;
        if cells.len() != expected {
            return Err(MapError::TileCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            extents,
            cells,
            tile_pixel_size: tile_pixel_size.max(1),
            cell_size,
        })
    }

    /// Tile counts on each side of the origin.
    #[inline]
    pub fn extents(&self) -> GridExtents {
        self.extents
    }

    /// `up + down`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.extents.rows()
    }

    /// `left + right`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.extents.cols()
    }

    /// Number of cell slots, empty or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a valid grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell storage.
    pub fn cells(&self) -> &[Option<TileRecord>] {
        &self.cells
    }

    /// Source pixel size of one tile.
    pub fn tile_pixel_size(&self) -> u32 {
        self.tile_pixel_size
    }

    /// Pixel size of a tile's source cell, never below 1.
    pub fn set_tile_pixel_size(&mut self, size: u32) {
        self.tile_pixel_size = size.max(1);
    }

    /// World size of one cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World size of one cell; rejects non-positive or non-finite sizes.
    pub fn set_cell_size(&mut self, cell_size: f32) -> Result<(), MapError> {
        check_cell_size(cell_size)?;
        self.cell_size = cell_size;
        Ok(())
    }

    /// Cell at `(row, col)`; errors for negative or out-of-range input.
    pub fn get_cell(&self, row: i64, col: i64) -> Result<Option<TileRecord>, MapError> {
        let idx = index_of(row, col, &self.extents)?;
        Ok(self.cells[idx])
    }

    /// Tile at `coord`, `None` for empty cells and coordinates off the grid.
    pub fn tile(&self, coord: CellCoord) -> Option<&TileRecord> {
        let idx = index_of_coord(coord, &self.extents).ok()?;
        self.cells[idx].as_ref()
    }

    /// Replaces one cell; `None` erases it.
    pub fn set_cell(
        &mut self,
        row: i64,
        col: i64,
        tile: Option<TileRecord>,
        observer: &mut dyn GridObserver,
    ) -> Result<(), MapError> {
        let idx = index_of(row, col, &self.extents)?;
        self.cells[idx] = tile;
        observer.cell_changed(CellCoord::new(row as usize, col as usize));
        Ok(())
    }

    /// Every cell with its coordinate, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, Option<&TileRecord>)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            coord_of(idx, &self.extents).map(|coord| (coord, cell.as_ref()))
        })
    }

    /// Cell under `world` for a grid whose origin is at `origin`.
    pub fn locate(&self, world: Vec2, origin: Vec2) -> Option<CellCoord> {
        locate(world, origin, self.cell_size, &self.extents)
    }

    /// World center of `coord`.
    pub fn cell_center(&self, coord: CellCoord, origin: Vec2) -> Option<Vec2> {
        cell_center(coord, origin, self.cell_size, &self.extents)
    }

    /// World rectangle the grid covers.
    pub fn world_bounds(&self, origin: Vec2) -> Rect {
        world_bounds(origin, self.cell_size, &self.extents)
    }

    /// Places `tile` under `world`. Clicks off the grid change nothing.
    pub fn paint_at(
        &mut self,
        world: Vec2,
        origin: Vec2,
        tile: TileRecord,
        observer: &mut dyn GridObserver,
    ) -> Option<CellCoord> {
        self.put_at(world, origin, Some(tile), observer)
    }

    /// Clears the cell under `world`.
    pub fn erase_at(
        &mut self,
        world: Vec2,
        origin: Vec2,
        observer: &mut dyn GridObserver,
    ) -> Option<CellCoord> {
        self.put_at(world, origin, None, observer)
    }

    fn put_at(
        &mut self,
        world: Vec2,
        origin: Vec2,
        tile: Option<TileRecord>,
        observer: &mut dyn GridObserver,
    ) -> Option<CellCoord> {
        let Some(coord) = self.locate(world, origin) else {
            debug!(x = world.x, y = world.y, "click_outside_grid");
            return None;
        };
        let idx = index_of_coord(coord, &self.extents).ok()?;
        self.cells[idx] = tile;
        observer.cell_changed(coord);
        Some(coord)
    }

    /// True when a solid tile sits under `world`.
    pub fn solid_at(&self, world: Vec2, origin: Vec2) -> bool {
        self.locate(world, origin)
            .and_then(|coord| self.tile(coord))
            .is_some_and(TileRecord::is_solid)
    }
}
