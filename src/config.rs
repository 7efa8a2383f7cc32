use crate::error::MapError;
use crate::map::{TileGrid, DEFAULT_CELL_SIZE, DEFAULT_TILE_PIXEL_SIZE};
use crate::spatial::GridExtents;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for new maps and the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Source pixel size of one tile.
    pub tile_pixel_size: u32,
    /// World size of one cell.
    pub cell_size: f32,
    /// Extents of a freshly created map.
    pub extents: GridExtents,
    /// Directory new map files are created in.
    pub map_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_pixel_size: DEFAULT_TILE_PIXEL_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            extents: GridExtents::new(1, 0, 0, 1),
            map_dir: PathBuf::from("tile_maps"),
        }
    }
}

impl EditorConfig {
    /// Empty grid to seed new map files with.
    pub fn template_grid(&self) -> Result<TileGrid, MapError> {
        TileGrid::new(self.extents, self.tile_pixel_size, self.cell_size)
    }
}

/// Timing of one grid step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// World distance covered by one step
    pub step_distance: f32,
    /// Seconds one step takes
    pub step_time: f32,
    /// Seconds between turning from standstill and being able to move
    pub turn_delay: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step_distance: 1.0,
            step_time: 0.15,
            turn_delay: 0.1,
        }
    }
}

impl MovementConfig {
    /// World units per second while stepping.
    pub fn speed(&self) -> f32 {
        self.step_distance / self.step_time
    }
}

/// Everything the editor and movement read at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map creation and editor settings.
    pub editor: EditorConfig,
    /// Grid movement timing.
    pub movement: MovementConfig,
}

impl Config {
    /// Parses and validates a config; missing keys take their defaults.
    pub fn from_json_str(txt: &str) -> Result<Self, MapError> {
        let config: Config = serde_json::from_str(txt)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects sizes and times that are not positive.
    pub fn validate(&self) -> Result<(), MapError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if self.editor.tile_pixel_size == 0 {
            return Err(MapError::InvalidConfig(
                "editor.tile_pixel_size must be at least 1".into(),
            ));
        }
        if !positive(self.editor.cell_size) {
            return Err(MapError::InvalidConfig(format!(
                "editor.cell_size must be positive, got {}",
                self.editor.cell_size
            )));
        }
        if !self.editor.extents.is_valid() {
            return Err(MapError::InvalidConfig(
                "editor.extents need at least one row and one column".into(),
            ));
        }
        let m = &self.movement;
        if !positive(m.step_distance) || !positive(m.step_time) {
            return Err(MapError::InvalidConfig(
                "movement.step_distance and movement.step_time must be positive".into(),
            ));
        }
        if !(m.turn_delay.is_finite() && m.turn_delay >= 0.0) {
            return Err(MapError::InvalidConfig(
                "movement.turn_delay must not be negative".into(),
            ));
        }
        Ok(())
    }
}
