// tests/integration_example.rs

use grid_tilemap::editor::{EditorSession, PointerButton};
use grid_tilemap::{
    AtlasCoord, CellCoord, ChangeLog, Config, Direction, GridMover, GridPlacement, InputState,
    JsonFileStore, KeyBindings, MapError, MapStore, MoveEvent, TileGrid, TileRecord, TileSheet,
};
use macroquad::prelude::{vec2, KeyCode, Vec2};
use std::cell::RefCell;

/// In-memory store that counts saves.
#[derive(Default)]
struct MemoryStore {
    saved: RefCell<Option<TileGrid>>,
    saves: RefCell<usize>,
}

impl MapStore for MemoryStore {
    fn load_grid(&self) -> Result<TileGrid, MapError> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }

    fn save_grid(&self, grid: &TileGrid) -> Result<(), MapError> {
        *self.saved.borrow_mut() = Some(grid.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[test]
fn clicks_are_ignored_until_editing_is_enabled() {
    let mut session =
        EditorSession::with_grid(TileGrid::default(), MemoryStore::default(), Vec2::ZERO, ChangeLog::default());
    assert_eq!(session.click(PointerButton::Primary, vec2(0.5, 0.5)), None);
    assert!(!session.is_dirty());

    session.set_editing(true);
    session.select_tile(AtlasCoord::new(3, 1));
    assert_eq!(
        session.click(PointerButton::Primary, vec2(0.5, 0.5)),
        Some(CellCoord::new(0, 0))
    );
    assert_eq!(
        session.grid().tile(CellCoord::new(0, 0)),
        Some(&TileRecord::new(AtlasCoord::new(3, 1)))
    );
    assert!(session.is_dirty());
    assert_eq!(session.observer().cells, vec![CellCoord::new(0, 0)]);

    assert_eq!(
        session.click(PointerButton::Secondary, vec2(0.5, 0.5)),
        Some(CellCoord::new(0, 0))
    );
    assert_eq!(session.grid().tile(CellCoord::new(0, 0)), None);
    // off the map
    assert_eq!(session.click(PointerButton::Primary, vec2(7.0, 7.0)), None);
}

#[test]
fn extent_edits_report_the_applied_value() {
    let mut session =
        EditorSession::with_grid(TileGrid::default(), MemoryStore::default(), Vec2::ZERO, ChangeLog::default());

    assert_eq!(session.set_extent(Direction::Left, 3), 3);
    assert_eq!(session.set_extent(Direction::Down, 2), 2);
    assert_eq!(session.grid().cols(), 4);
    assert_eq!(session.grid().rows(), 3);
    assert!(session.is_dirty());

    // clearing the only column right of the origin is fine, left still has 3
    assert_eq!(session.set_extent(Direction::Right, 0), 0);
    // clearing all of the left would leave no columns
    assert_eq!(session.set_extent(Direction::Left, -4), 1);
    assert_eq!(session.grid().cols(), 1);
    assert_eq!(session.observer().grid_changes, 4);

    let outline = session.outline();
    assert_eq!((outline.x, outline.y, outline.w, outline.h), (-1.0, -2.0, 1.0, 3.0));
}

#[test]
fn size_settings_are_clamped_or_rejected() {
    let mut session =
        EditorSession::with_grid(TileGrid::default(), MemoryStore::default(), Vec2::ZERO, ());
    session.set_tile_pixel_size(-4);
    assert_eq!(session.grid().tile_pixel_size(), 1);
    assert!(matches!(
        session.set_cell_size(0.0),
        Err(MapError::InvalidCellSize(_))
    ));
    session.set_cell_size(2.0).unwrap();
    assert_eq!(session.grid().cell_size(), 2.0);
}

#[test]
fn save_and_reload_through_the_store() {
    let mut session =
        EditorSession::with_grid(TileGrid::default(), MemoryStore::default(), Vec2::ZERO, ());
    session.set_editing(true);
    session.set_extent(Direction::Up, 2);
    session.click(PointerButton::Primary, vec2(0.5, 1.5));
    session.save().unwrap();
    assert!(!session.is_dirty());
    assert_eq!(*session.store().saves.borrow(), 1);

    session.click(PointerButton::Secondary, vec2(0.5, 1.5));
    assert!(session.is_dirty());
    session.reload().unwrap();
    assert!(!session.is_dirty());
    assert!(session.grid().tile(CellCoord::new(0, 0)).is_some());
}

#[test]
fn edit_a_map_file_then_walk_on_it() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let template = config.editor.template_grid().unwrap();
    let store = JsonFileStore::create(dir.path(), "Walkway", &template).unwrap();

    let mut session = EditorSession::open(store, Vec2::ZERO, ChangeLog::default()).unwrap();
    session.set_editing(true);
    session.set_extent(Direction::Right, 3);
    session.set_extent(Direction::Down, 1);

    // pick the wall tile from the sheet and paint the far right of the top row
    let sheet = TileSheet::new(128, 128, 32);
    let wall = sheet.tile_at(vec2(70.0, 5.0), 1.0).unwrap();
    session.select_tile(wall);
    session.set_paint_solid(true);
    session.click(PointerButton::Primary, vec2(2.5, 0.5));
    session.save().unwrap();

    let (_, store, _) = session.into_parts();
    let grid = store.load_grid().unwrap();
    assert_eq!(grid.tile(CellCoord::new(0, 2)), Some(&TileRecord::solid(AtlasCoord::new(2, 0))));

    let world = GridPlacement {
        grid: &grid,
        origin: Vec2::ZERO,
    };
    let bindings = KeyBindings::default();
    let right = InputState::with_keys([KeyCode::D]);
    let mut mover = GridMover::new(vec2(0.5, 0.5), config.movement);

    let mut bumped = false;
    for _ in 0..40 {
        if let MoveEvent::Bumped(Direction::Right) = mover.fixed_update(0.02, &right, &bindings, &world) {
            bumped = true;
            break;
        }
    }
    assert!(bumped, "mover never reached the wall");
    assert_eq!(mover.position(), vec2(1.5, 0.5));
}
