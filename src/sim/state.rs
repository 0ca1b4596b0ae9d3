//! Simulation state
//!
//! Everything that changes frame to frame during a run lives here. All of it is
//! rebuilt from the level on every (re)start, so nothing carries over between runs.

use glam::Vec2;

use super::level::{EntityKind, Level, LevelEntity};
use crate::Rect;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Result of one simulation step, reported to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepOutcome {
    #[default]
    None,
    /// Player reached a goal
    Won,
    /// Player touched a hazard or monster, or fell out of the world
    Lost,
}

impl StepOutcome {
    pub fn is_terminal(self) -> bool {
        self != StepOutcome::None
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner in world units
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub is_grounded: bool,
    pub facing: Facing,
    /// Animation frame counter
    pub frame: u32,
}

impl Player {
    /// Spawn at the level's start marker, at rest
    pub fn spawn(start: &LevelEntity) -> Self {
        Self {
            pos: Vec2::new(start.x, start.y),
            vel: Vec2::ZERO,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            is_grounded: false,
            facing: Facing::Right,
            frame: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Signed horizontal velocity, magnitude == speed
    pub vx: f32,
    pub patrol_start: f32,
    pub patrol_end: f32,
    pub speed: f32,
}

impl Monster {
    /// Build live state from a monster entity. Returns None for any other kind.
    pub fn from_entity(entity: &LevelEntity) -> Option<Self> {
        match entity.kind {
            EntityKind::Monster {
                patrol_start,
                patrol_end,
                speed,
            } => Some(Self {
                id: entity.id.clone(),
                x: entity.x.max(patrol_start).min(patrol_end),
                y: entity.y,
                width: entity.w,
                height: entity.h,
                vx: speed,
                patrol_start,
                patrol_end,
                speed,
            }),
            EntityKind::Platform | EntityKind::Hazard | EntityKind::Goal | EntityKind::Start => {
                None
            }
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Viewport offset (world position of the viewport's top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub pos: Vec2,
}

/// Complete per-run simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub player: Player,
    /// One per monster entity, in level order
    pub monsters: Vec<Monster>,
    pub camera: Camera,
    /// Simulation steps since the run started
    pub time_ticks: u64,
}

impl SimState {
    /// Build a fresh run from the level. Returns None if the level has no start
    /// marker, which validated levels never lack.
    pub fn new(level: &Level) -> Option<Self> {
        let start = level.start()?;
        Some(Self {
            player: Player::spawn(start),
            monsters: level.monsters().filter_map(Monster::from_entity).collect(),
            camera: Camera::default(),
            time_ticks: 0,
        })
    }
}
