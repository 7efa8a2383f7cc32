//! Editing session over one tile map: painting, erasing, resizing and saving.
//!
//! The session holds no UI. A front end forwards pointer clicks (already in
//! world space) and extent edits, and redraws when the observer is notified.

use crate::error::MapError;
use crate::loader::MapStore;
use crate::map::{GridObserver, TileGrid};
use crate::spatial::{CellCoord, Direction};
use crate::tile::{AtlasCoord, TileRecord};
use macroquad::prelude::{Rect, Vec2};
use tracing::{debug, info};

/// Pointer button of a click on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints the selected tile
    Primary,
    /// Erases
    Secondary,
}

/// One open map with its store, brush and edit state.
pub struct EditorSession<S: MapStore, O: GridObserver> {
    grid: TileGrid,
    store: S,
    observer: O,
    origin: Vec2,
    selected: AtlasCoord,
    paint_solid: bool,
    editing: bool,
    dirty: bool,
}

impl<S: MapStore, O: GridObserver> EditorSession<S, O> {
    /// Loads the map from `store`.
    pub fn open(store: S, origin: Vec2, observer: O) -> Result<Self, MapError> {
        let grid = store.load_grid()?;
        Ok(Self::with_grid(grid, store, origin, observer))
    }

    /// Session over an in-memory grid, saved to `store` on [`save`](Self::save).
    pub fn with_grid(grid: TileGrid, store: S, origin: Vec2, observer: O) -> Self {
        Self {
            grid,
            store,
            observer,
            origin,
            selected: AtlasCoord::default(),
            paint_solid: false,
            editing: false,
            dirty: false,
        }
    }

    /// Map being edited.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Observer receiving change notifications.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Store the map is loaded from and saved to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// World position of the grid origin.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Unsaved changes pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether clicks paint.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Clicks only touch the map while editing is enabled.
    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Atlas cell the brush paints with.
    pub fn selected(&self) -> AtlasCoord {
        self.selected
    }

    /// Picks the atlas cell the brush paints with.
    pub fn select_tile(&mut self, atlas: AtlasCoord) {
        self.selected = atlas;
    }

    /// Whether painted tiles block movement.
    pub fn set_paint_solid(&mut self, solid: bool) {
        self.paint_solid = solid;
    }

    /// Tile a primary click places right now.
    pub fn brush(&self) -> TileRecord {
        TileRecord::new(self.selected).with_solid(self.paint_solid)
    }

    /// Paints or erases the cell under `world`; returns the cell touched.
    pub fn click(&mut self, button: PointerButton, world: Vec2) -> Option<CellCoord> {
        if !self.editing {
            return None;
        }
        let touched = match button {
            PointerButton::Primary => {
                let brush = self.brush();
                self.grid
                    .paint_at(world, self.origin, brush, &mut self.observer)
            }
            PointerButton::Secondary => self.grid.erase_at(world, self.origin, &mut self.observer),
        };
        if let Some(coord) = touched {
            debug!(row = coord.row, col = coord.col, ?button, "cell_edited");
            self.dirty = true;
        }
        touched
    }

    /// Sets one side of the map to `value` tiles and returns what was applied.
    pub fn set_extent(&mut self, direction: Direction, value: i64) -> u32 {
        let before = self.grid.extents();
        let applied = self
            .grid
            .determine_change(value.max(0), Some(direction), &mut self.observer)
            .unwrap_or_else(|| before.get(direction));
        if self.grid.extents() != before {
            self.dirty = true;
        }
        applied
    }

    /// Pixel size of source tiles, clamped to at least 1.
    pub fn set_tile_pixel_size(&mut self, size: i64) {
        let size = u32::try_from(size.max(1)).unwrap_or(u32::MAX);
        if size != self.grid.tile_pixel_size() {
            self.grid.set_tile_pixel_size(size);
            self.dirty = true;
            self.observer.grid_changed();
        }
    }

    /// World size of one cell; rejects non-positive sizes.
    pub fn set_cell_size(&mut self, cell_size: f32) -> Result<(), MapError> {
        if cell_size != self.grid.cell_size() {
            self.grid.set_cell_size(cell_size)?;
            self.dirty = true;
            self.observer.grid_changed();
        }
        Ok(())
    }

    /// World rectangle outlining the map.
    pub fn outline(&self) -> Rect {
        self.grid.world_bounds(self.origin)
    }

    /// Writes the map through the store and clears the dirty flag.
    pub fn save(&mut self) -> Result<(), MapError> {
        self.store.save_grid(&self.grid)?;
        self.dirty = false;
        Ok(())
    }

    /// Replaces the grid with the stored one, dropping unsaved edits.
    pub fn reload(&mut self) -> Result<(), MapError> {
        self.grid = self.store.load_grid()?;
        self.dirty = false;
        self.observer.grid_changed();
        info!(rows = self.grid.rows(), cols = self.grid.cols(), "map_reloaded");
        Ok(())
    }

    /// Hands back the grid, the store and the observer.
    pub fn into_parts(self) -> (TileGrid, S, O) {
        (self.grid, self.store, self.observer)
    }
}
