use crate::tile::AtlasCoord;
use macroquad::prelude::{Rect, Vec2};

/// Source sheet the tiles are cut from, split into square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSheet {
    /// Sheet width in pixels.
    pub width_px: u32,
    /// Sheet height in pixels.
    pub height_px: u32,
    /// Side of one square tile, in pixels.
    pub tile_pixel_size: u32,
}

impl TileSheet {
    /// Sheet of `width_px` by `height_px`; the tile size is clamped to at least 1.
    pub fn new(width_px: u32, height_px: u32, tile_pixel_size: u32) -> Self {
        TileSheet {
            width_px,
            height_px,
            tile_pixel_size: tile_pixel_size.max(1),
        }
    }

    /// Whole tiles across; a partial column at the right edge is not counted.
    pub fn columns(&self) -> u32 {
        self.width_px / self.tile_pixel_size
    }

    /// Whole tiles down the sheet.
    pub fn rows(&self) -> u32 {
        self.height_px / self.tile_pixel_size
    }

    /// True when `coord` lies on the sheet.
    pub fn contains(&self, coord: AtlasCoord) -> bool {
        coord.x < self.columns() && coord.y < self.rows()
    }

    /// Tile under `pointer`, given in pixels of the sheet drawn at `zoom`.
    pub fn tile_at(&self, pointer: Vec2, zoom: f32) -> Option<AtlasCoord> {
        if !(zoom.is_finite() && zoom > 0.0) || pointer.x < 0.0 || pointer.y < 0.0 {
            return None;
        }
        let span = self.tile_pixel_size as f32 * zoom;
        let coord = AtlasCoord::new(
            (pointer.x / span).floor() as u32,
            (pointer.y / span).floor() as u32,
        );
        self.contains(coord).then_some(coord)
    }

    /// Source rectangle of `coord` in sheet pixels.
    pub fn source_rect(&self, coord: AtlasCoord) -> Option<Rect> {
        if !self.contains(coord) {
            return None;
        }
        let size = self.tile_pixel_size;
        Some(Rect::new(
            (coord.x * size) as f32,
            (coord.y * size) as f32,
            size as f32,
            size as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    #[test]
    fn counts_whole_tiles() {
        let sheet = TileSheet::new(100, 64, 32);
        assert_eq!(sheet.columns(), 3);
        assert_eq!(sheet.rows(), 2);
        assert!(sheet.contains(AtlasCoord::new(2, 1)));
        assert!(!sheet.contains(AtlasCoord::new(3, 0)));
    }

    #[test]
    fn picks_tile_under_zoomed_pointer() {
        let sheet = TileSheet::new(128, 64, 32);
        assert_eq!(sheet.tile_at(vec2(10.0, 10.0), 1.0), Some(AtlasCoord::new(0, 0)));
        assert_eq!(sheet.tile_at(vec2(70.0, 40.0), 1.0), Some(AtlasCoord::new(2, 1)));
        assert_eq!(sheet.tile_at(vec2(70.0, 40.0), 2.0), Some(AtlasCoord::new(1, 0)));
        assert_eq!(sheet.tile_at(vec2(130.0, 10.0), 1.0), None);
        assert_eq!(sheet.tile_at(vec2(-1.0, 10.0), 1.0), None);
        assert_eq!(sheet.tile_at(vec2(10.0, 10.0), 0.0), None);
    }

    #[test]
    fn source_rect_in_sheet_pixels() {
        let sheet = TileSheet::new(128, 64, 32);
        assert_eq!(
            sheet.source_rect(AtlasCoord::new(3, 1)),
            Some(Rect::new(96.0, 32.0, 32.0, 32.0))
        );
        assert_eq!(sheet.source_rect(AtlasCoord::new(4, 0)), None);
    }
}
