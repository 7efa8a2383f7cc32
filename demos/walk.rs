use anyhow::Context;
use grid_tilemap::editor::{EditorSession, PointerButton};
use grid_tilemap::{
    CellCoord, Config, Direction, GridMover, GridObserver, GridPlacement, InputState,
    JsonFileStore, KeyBindings, MoveEvent,
};
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const FIXED_DT: f32 = 1.0 / 50.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Grid Walk".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// Counts repaint requests so the HUD can show them.
#[derive(Default)]
struct Repaints(usize);

impl GridObserver for Repaints {
    fn grid_changed(&mut self) {
        self.0 += 1;
    }

    fn cell_changed(&mut self, _coord: CellCoord) {
        self.0 += 1;
    }
}

/// Snapshot of the movement keys this frame.
fn poll_input(bindings: &KeyBindings) -> InputState {
    let keys = Direction::ALL
        .into_iter()
        .flat_map(|d| bindings.keys(d))
        .filter(|k| is_key_down(*k));
    InputState::with_keys(keys)
}

fn tile_color(atlas_x: u32, atlas_y: u32, solid: bool) -> Color {
    if solid {
        return DARKGRAY;
    }
    let palette = [GREEN, BEIGE, SKYBLUE, ORANGE, PURPLE];
    palette[((atlas_x + atlas_y) as usize) % palette.len()]
}

async fn run() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).with_context(|| format!("Loading config {path}"))?,
        None => Config::default(),
    };
    let template = config.editor.template_grid()?;
    let store = JsonFileStore::create(&config.editor.map_dir, "Walkway", &template)
        .context("Creating map file")?;
    let mut session = EditorSession::open(store, Vec2::ZERO, Repaints::default())
        .context("Opening map")?;
    for (direction, value) in [
        (Direction::Up, 4),
        (Direction::Down, 4),
        (Direction::Left, 6),
        (Direction::Right, 6),
    ] {
        if session.grid().extents().get(direction) < value {
            session.set_extent(direction, value as i64);
        }
    }

    let bindings = KeyBindings::default();
    let start = session
        .grid()
        .cell_center(CellCoord::new(0, 0), session.origin())
        .unwrap_or(Vec2::ZERO);
    let mut mover = GridMover::new(start, config.movement);
    let mut accumulator = 0.0;

    loop {
        clear_background(BLACK);
        let camera = Camera2D {
            target: mover.position(),
            zoom: vec2(2.0 / 16.0, 2.0 / 9.0),
            ..Default::default()
        };
        set_camera(&camera);

        if is_key_pressed(KeyCode::Tab) {
            session.set_editing(!session.is_editing());
        }
        if is_key_pressed(KeyCode::LeftShift) {
            let solid = !session.brush().is_solid();
            session.set_paint_solid(solid);
        }
        if is_key_pressed(KeyCode::F5) {
            match session.save() {
                Ok(()) => info!("map_saved_from_demo"),
                Err(err) => error!(error = %err, "save_failed"),
            }
        }
        let world_mouse = camera.screen_to_world(mouse_position().into());
        if is_mouse_button_pressed(MouseButton::Left) {
            session.click(PointerButton::Primary, world_mouse);
        } else if is_mouse_button_pressed(MouseButton::Right) {
            session.click(PointerButton::Secondary, world_mouse);
        }

        accumulator += get_frame_time();
        let input = poll_input(&bindings);
        while accumulator >= FIXED_DT {
            let world = GridPlacement {
                grid: session.grid(),
                origin: session.origin(),
            };
            if let MoveEvent::Bumped(direction) =
                mover.fixed_update(FIXED_DT, &input, &bindings, &world)
            {
                info!(%direction, "bumped");
            }
            accumulator -= FIXED_DT;
        }

        let grid = session.grid();
        let half = grid.cell_size() / 2.0;
        for (coord, tile) in grid.iter_cells() {
            let Some(center) = grid.cell_center(coord, session.origin()) else {
                continue;
            };
            if let Some(tile) = tile {
                let atlas = tile.atlas();
                let color = tile_color(atlas.x, atlas.y, tile.is_solid());
                draw_rectangle(
                    center.x - half,
                    center.y - half,
                    grid.cell_size(),
                    grid.cell_size(),
                    color,
                );
            }
        }
        let outline = session.outline();
        let outline_color = if session.is_editing() { RED } else { GREEN };
        draw_rectangle_lines(outline.x, outline.y, outline.w, outline.h, 0.05, outline_color);
        draw_circle(mover.position().x, mover.position().y, 0.35, YELLOW);

        set_default_camera();
        draw_text(
            &format!(
                "editing: {}  solid brush: {}  repaints: {}  dirty: {}",
                session.is_editing(),
                session.brush().is_solid(),
                session.observer().0,
                session.is_dirty()
            ),
            20.0,
            30.0,
            24.0,
            WHITE,
        );

        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        error!(error = %format!("{err:#}"), "demo_failed");
    }
}
