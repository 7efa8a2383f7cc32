#![warn(missing_docs)]

//! Directional tile-grid model for Macroquad games.
//!
//! A [`TileGrid`] is a rectangle of tiles counted outward from a fixed origin.
//! It grows and shrinks one edge at a time without moving the tiles already
//! placed, resolves world positions to cells, and round-trips through a single
//! JSON schema. [`EditorSession`] wraps it for painting tools and
//! [`GridMover`] walks a character across it tile by tile.

/// Startup settings.
pub mod config;
pub mod editor;
mod error;
pub mod loader;
mod map;
pub mod movement;
mod resize;
pub mod spatial;
mod tile;
mod tileset;

pub use config::{Config, EditorConfig, MovementConfig};
pub use editor::{EditorSession, PointerButton};
pub use error::MapError;
pub use loader::{decode_grid, encode_grid, validate_map_name, JsonFileStore, MapStore};
pub use map::{
    ChangeLog, GridObserver, TileGrid, DEFAULT_CELL_SIZE, DEFAULT_TILE_PIXEL_SIZE, MAX_CELL_COUNT,
};
pub use movement::{GridMover, GridPlacement, InputState, KeyBindings, MoveEvent, Occupancy};
pub use spatial::{CellCoord, Direction, GridExtents};
pub use tile::{AtlasCoord, TileRecord};
pub use tileset::TileSheet;
