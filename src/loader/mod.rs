//! Tile map persistence: one JSON schema and the stores that read/write it.

/// JSON encoding of a [`TileGrid`](crate::TileGrid).
pub mod json_loader;
mod store;

pub use json_loader::{decode_grid, encode_grid};
pub use store::{validate_map_name, JsonFileStore, MapStore, MAX_MAP_NAME_LEN};
