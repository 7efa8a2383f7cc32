// src/loader/json_loader.rs
use crate::error::MapError;
use crate::map::TileGrid;
use crate::spatial::GridExtents;
use crate::tile::{AtlasCoord, TileRecord};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct JsonTile {
    atlas_x: i64,
    atlas_y: i64,
    #[serde(default)]
    solid: bool,
}

#[derive(Serialize, Deserialize)]
struct JsonTileMap {
    #[serde(default = "default_pixel_size")]
    tile_pixel_size: u32,
    #[serde(default = "one")]
    cell_size: f32,
    tiles_up: u32,
    tiles_down: u32,
    tiles_left: u32,
    tiles_right: u32,
    tiles: Vec<Option<JsonTile>>, // row-major, top row first; null is empty
}

fn default_pixel_size() -> u32 {
    crate::map::DEFAULT_TILE_PIXEL_SIZE
}
fn one() -> f32 {
    1.0
}

impl JsonTile {
    /// Negative atlas coordinates mean "no texture" and load as empty.
    fn into_record(self) -> Option<TileRecord> {
        let x = u32::try_from(self.atlas_x).ok()?;
        let y = u32::try_from(self.atlas_y).ok()?;
        Some(TileRecord::new(AtlasCoord::new(x, y)).with_solid(self.solid))
    }

    fn from_record(tile: &TileRecord) -> Self {
        let atlas = tile.atlas();
        JsonTile {
            atlas_x: atlas.x as i64,
            atlas_y: atlas.y as i64,
            solid: tile.is_solid(),
        }
    }
}

/// Serializes `grid` as pretty JSON.
pub fn encode_grid(grid: &TileGrid) -> Result<String, MapError> {
    let ext = grid.extents();
    let j = JsonTileMap {
        tile_pixel_size: grid.tile_pixel_size(),
        cell_size: grid.cell_size(),
        tiles_up: ext.up,
        tiles_down: ext.down,
        tiles_left: ext.left,
        tiles_right: ext.right,
        tiles: grid
            .cells()
            .iter()
            .map(|cell| cell.as_ref().map(JsonTile::from_record))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&j)?)
}

/// Parses a grid, checking extents, cell size and the tile count.
pub fn decode_grid(txt: &str) -> Result<TileGrid, MapError> {
    let j: JsonTileMap = serde_json::from_str(txt)?;
    let extents = GridExtents::new(j.tiles_up, j.tiles_down, j.tiles_left, j.tiles_right);
    let cells = j
        .tiles
        .into_iter()
        .map(|t| t.and_then(JsonTile::into_record))
        .collect();
    TileGrid::from_parts(extents, j.tile_pixel_size, j.cell_size, cells)
}
