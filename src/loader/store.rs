use crate::error::MapError;
use crate::loader::json_loader::{decode_grid, encode_grid};
use crate::map::TileGrid;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Longest accepted map name, in characters.
pub const MAX_MAP_NAME_LEN: usize = 31;

const EDGE_CHARS: [char; 4] = [' ', '.', '_', '-'];
const FORBIDDEN_CHARS: [char; 21] = [
    '#', '%', '&', '{', '}', '/', '<', '>', '*', '~', '?', '$', '!', '\'', '"', '\\', ':', '@',
    '+', '`', '|',
];

/// Where a tile map is loaded from and saved to.
pub trait MapStore {
    /// Reads the stored map.
    fn load_grid(&self) -> Result<TileGrid, MapError>;
    /// Replaces the stored map with `grid`.
    fn save_grid(&self, grid: &TileGrid) -> Result<(), MapError>;
}

/// Checks a map file name (without extension).
pub fn validate_map_name(name: &str) -> Result<(), MapError> {
    let reject = |reason| {
        Err(MapError::InvalidMapName {
            name: name.to_owned(),
            reason,
        })
    };

    let (Some(first), Some(last)) = (name.chars().next(), name.chars().last()) else {
        return reject("name is empty");
    };
    if name.chars().count() > MAX_MAP_NAME_LEN {
        return reject("name is longer than 31 characters");
    }
    if EDGE_CHARS.contains(&first) {
        return reject("name cannot start with a space, period, underscore or hyphen");
    }
    if EDGE_CHARS.contains(&last) {
        return reject("name cannot end with a space, period, underscore or hyphen");
    }
    if name.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        return reject("name contains a forbidden character");
    }
    Ok(())
}

/// Map stored as one JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store for `path`; only `.json` files are supported.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(MapError::UnsupportedFormat(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Creates `<dir>/<name>.json` holding `template`.
    ///
    /// An existing file with that name is kept as is.
    pub fn create<P: AsRef<Path>>(dir: P, name: &str, template: &TileGrid) -> Result<Self, MapError> {
        validate_map_name(name)?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| MapError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let store = Self::new(dir.join(format!("{name}.json")))?;
        if store.path.exists() {
            info!(path = %store.path.display(), "map_file_exists");
        } else {
            store.save_grid(template)?;
            info!(path = %store.path.display(), "map_file_created");
        }
        Ok(store)
    }

    /// File this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MapStore for JsonFileStore {
    fn load_grid(&self) -> Result<TileGrid, MapError> {
        let txt = fs::read_to_string(&self.path).map_err(|source| MapError::Io {
            path: self.path.clone(),
            source,
        })?;
        let grid = decode_grid(&txt).map_err(|err| match err {
            MapError::Parse(source) => MapError::Json {
                path: self.path.clone(),
                source,
            },
            other => other,
        })?;
        info!(
            path = %self.path.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            "map_loaded"
        );
        Ok(grid)
    }

    fn save_grid(&self, grid: &TileGrid) -> Result<(), MapError> {
        let txt = encode_grid(grid)?;
        write_text_atomic(&self.path, &txt).map_err(|source| MapError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(
            path = %self.path.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            "map_saved"
        );
        Ok(())
    }
}

fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if fs::rename(&tmp_path, path).is_ok() {
        return Ok(());
    }
    // Platforms that refuse to rename over an existing file.
    let replaced = match fs::remove_file(path) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
        _ => fs::rename(&tmp_path, path),
    };
    if replaced.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    replaced
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("map.json");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}
