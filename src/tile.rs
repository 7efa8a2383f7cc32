use serde::{Deserialize, Serialize};

/// Column/row of a tile cell on the shared source sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AtlasCoord {
    /// Sheet column, counted from the left edge
    pub x: u32,
    /// Sheet row, counted from the top edge
    pub y: u32,
}

impl AtlasCoord {
    /// Cell `x` columns in and `y` rows down.
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One placed tile. Empty cells are `None` in the grid, never a record.
///
/// Records are replaced wholesale on edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRecord {
    atlas: AtlasCoord,
    solid: bool,
}

impl TileRecord {
    /// Non-solid tile showing `atlas`.
    pub fn new(atlas: AtlasCoord) -> Self {
        Self {
            atlas,
            solid: false,
        }
    }

    /// Tile that blocks movement.
    pub fn solid(atlas: AtlasCoord) -> Self {
        Self { atlas, solid: true }
    }

    /// Same tile with the collision flag set to `solid`.
    pub fn with_solid(self, solid: bool) -> Self {
        Self { solid, ..self }
    }

    /// Atlas cell the tile is drawn from.
    #[inline]
    pub fn atlas(&self) -> AtlasCoord {
        self.atlas
    }

    /// True when the tile blocks movement.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.solid
    }
}
