//! Grid addressing: directions, extents, row-major indexing and world lookup.

mod direction;
mod extents;
mod index;
mod locate;

pub use direction::Direction;
pub use extents::GridExtents;
pub use index::{coord_of, index_of, index_of_coord, CellCoord};
pub use locate::{cell_center, locate, world_bounds};
