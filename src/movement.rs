//! Tile-by-tile movement driven from a fixed-step update.
//!
//! Input arrives as an explicit [`InputState`] snapshot and collision as an
//! [`Occupancy`] query, so the mover never reads global engine state.

use crate::config::MovementConfig;
use crate::map::TileGrid;
use crate::spatial::Direction;
use macroquad::prelude::{KeyCode, Vec2};
use std::collections::HashSet;
use tracing::debug;

/// Slack for float drift when a step is about to end.
const STEP_EPSILON: f32 = 1e-4;

/// Primary and alternate key for each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Keys that move up.
    pub up: [KeyCode; 2],
    /// Keys that move down.
    pub down: [KeyCode; 2],
    /// Keys that move left.
    pub left: [KeyCode; 2],
    /// Keys that move right.
    pub right: [KeyCode; 2],
}

impl Default for KeyBindings {
    /// Arrow keys plus WASD.
    fn default() -> Self {
        Self {
            up: [KeyCode::Up, KeyCode::W],
            down: [KeyCode::Down, KeyCode::S],
            left: [KeyCode::Left, KeyCode::A],
            right: [KeyCode::Right, KeyCode::D],
        }
    }
}

impl KeyBindings {
    /// Both keys bound to `direction`.
    pub fn keys(&self, direction: Direction) -> [KeyCode; 2] {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Keys held down during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holding exactly `keys`.
    pub fn with_keys<I: IntoIterator<Item = KeyCode>>(keys: I) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }

    /// Marks `key` held.
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    /// Marks `key` released.
    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// True while `key` is down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// The single direction whose keys are held; `None` for no input or a
    /// mix of directions.
    pub fn direction(&self, bindings: &KeyBindings) -> Option<Direction> {
        let mut found = None;
        for direction in Direction::ALL {
            if bindings.keys(direction).iter().any(|k| self.is_held(*k)) {
                if found.is_some() {
                    return None;
                }
                found = Some(direction);
            }
        }
        found
    }
}

/// Answers whether a step from `from` to `to` runs into something.
pub trait Occupancy {
    /// True when a step from `from` to `to` may not happen.
    fn is_blocked(&self, from: Vec2, to: Vec2) -> bool;
}

/// Nothing ever blocks.
impl Occupancy for () {
    fn is_blocked(&self, _from: Vec2, _to: Vec2) -> bool {
        false
    }
}

/// A tile grid placed in the world; solid tiles block.
#[derive(Debug, Clone, Copy)]
pub struct GridPlacement<'a> {
    /// Grid whose solid tiles block.
    pub grid: &'a TileGrid,
    /// World position of the grid origin.
    pub origin: Vec2,
}

impl Occupancy for GridPlacement<'_> {
    fn is_blocked(&self, _from: Vec2, to: Vec2) -> bool {
        self.grid.solid_at(to, self.origin)
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveEvent {
    /// No input and nothing in progress
    Idle,
    /// Turn delay still running
    Waiting,
    /// Now facing a new direction
    Turned(Direction),
    /// Left `from` for `to`
    StepStarted {
        /// Cell center left behind.
        from: Vec2,
        /// Cell center the step ends on.
        to: Vec2,
    },
    /// Mid-step
    Stepping,
    /// Landed exactly on the step target
    StepFinished(Vec2),
    /// Facing direction is blocked
    Bumped(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Step {
    from: Vec2,
    to: Vec2,
    remaining: f32,
    traveled: f32,
}

/// Moves a point one cell at a time on fixed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMover {
    config: MovementConfig,
    position: Vec2,
    facing: Direction,
    step: Option<Step>,
    turn_timer: f32,
    /// Whether the mover walked on each of the last three input ticks, newest first.
    recent: [bool; 3],
}

impl GridMover {
    /// Idle mover at `position`, facing down.
    pub fn new(position: Vec2, config: MovementConfig) -> Self {
        Self {
            config,
            position,
            facing: Direction::Down,
            step: None,
            turn_timer: 0.0,
            recent: [false; 3],
        }
    }

    /// Current world position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Direction of the last turn or step.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// True between a step starting and landing.
    pub fn is_stepping(&self) -> bool {
        self.step.is_some()
    }

    /// Target of the step in progress.
    pub fn destination(&self) -> Option<Vec2> {
        self.step.map(|s| s.to)
    }

    /// Advances one fixed tick of `dt` seconds.
    ///
    /// A step that finishes on this tick still lets the input be read, so a
    /// held key chains steps without an idle tick. Such a tick reports the new
    /// action, or `StepFinished` when there is none.
    pub fn fixed_update<W: Occupancy + ?Sized>(
        &mut self,
        dt: f32,
        input: &InputState,
        bindings: &KeyBindings,
        world: &W,
    ) -> MoveEvent {
        if self.turn_timer > 0.0 {
            self.turn_timer -= dt;
        }

        let mut arrived = None;
        if let Some(step) = self.step.as_mut() {
            step.remaining -= dt;
            step.traveled += self.config.speed() * dt;
            let done = step.traveled >= self.config.step_distance - STEP_EPSILON
                || step.remaining <= STEP_EPSILON;
            if !done {
                let heading = (step.to - step.from).normalize_or_zero();
                self.position = step.from + heading * step.traveled;
                return MoveEvent::Stepping;
            }
            self.position = step.to;
            self.step = None;
            arrived = Some(self.position);
        }

        if self.turn_timer > 0.0 {
            return MoveEvent::Waiting;
        }

        let event = match input.direction(bindings) {
            None => {
                self.track(false);
                MoveEvent::Idle
            }
            Some(direction) if direction == self.facing => {
                self.track(true);
                self.try_step(direction, world)
            }
            Some(direction) => self.turn(direction),
        };

        match (event, arrived) {
            (MoveEvent::Idle, Some(at)) => MoveEvent::StepFinished(at),
            (event, _) => event,
        }
    }

    fn try_step<W: Occupancy + ?Sized>(&mut self, direction: Direction, world: &W) -> MoveEvent {
        let from = self.position;
        let to = from + direction.step() * self.config.step_distance;
        if world.is_blocked(from, to) {
            debug!(%direction, x = to.x, y = to.y, "step_blocked");
            return MoveEvent::Bumped(direction);
        }
        self.step = Some(Step {
            from,
            to,
            remaining: self.config.step_time,
            traveled: 0.0,
        });
        MoveEvent::StepStarted { from, to }
    }

    fn turn(&mut self, direction: Direction) -> MoveEvent {
        self.facing = direction;
        // only a mover that was standing still hesitates
        if !self.recent.iter().any(|&moved| moved) {
            self.turn_timer = self.config.turn_delay;
        }
        MoveEvent::Turned(direction)
    }

    fn track(&mut self, moved: bool) {
        self.recent.rotate_right(1);
        self.recent[0] = moved;
    }
}
