use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for grid edits, lookups and map persistence
#[derive(Debug, Error)]
pub enum MapError {
    /// A row or column below zero reached the index mapper
    #[error("negative cell index: row {row}, col {col}")]
    NegativeIndex {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },
    /// A row or column past the current extents
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfRange {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Rows in the grid.
        rows: usize,
        /// Columns in the grid.
        cols: usize,
    },
    /// Flat tile storage does not hold `rows * cols` slots
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch {
        /// `rows * cols` of the extents.
        expected: usize,
        /// Tiles supplied.
        actual: usize,
    },
    /// A grid needs at least one row and one column
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    ZeroDimension {
        /// Rows requested.
        rows: usize,
        /// Columns requested.
        cols: usize,
    },
    /// Extents whose `rows * cols` is past the cell limit
    #[error("a {rows}x{cols} grid exceeds the {max} cell limit")]
    GridTooLarge {
        /// Rows requested.
        rows: usize,
        /// Columns requested.
        cols: usize,
        /// Cell limit in force.
        max: usize,
    },
    /// World cell size must be finite and positive
    #[error("invalid cell size {0}")]
    InvalidCellSize(f32),
    /// Direction name that is not up/down/left/right
    #[error("unknown direction '{0}'")]
    InvalidDirection(String),
    /// Map file name rejected by the naming rules
    #[error("invalid map name '{name}': {reason}")]
    InvalidMapName {
        /// Name as given.
        name: String,
        /// Rule it broke.
        reason: &'static str,
    },
    /// Unsupported file format (non-JSON)
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    /// JSON parse or encode error on in-memory text
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
    /// File I/O error
    #[error("failed to read/write {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// JSON parse or encode error
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File being read.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_json::Error,
    },
    /// Configuration value out of its allowed range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
