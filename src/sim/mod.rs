//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, no wall-clock time
//! - No randomness
//! - Stable iteration order (level array order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod level;
pub mod patrol;
pub mod physics;
pub mod state;
pub mod tick;

pub use camera::{camera_target, update_camera};
pub use collision::{Contact, clamp_to_world, resolve_collisions, resolve_platform};
pub use level::{EntityKind, Level, LevelEntity, LevelError};
pub use patrol::advance_patrol;
pub use physics::integrate_player;
pub use state::{Camera, Facing, Monster, Player, SimState, StepOutcome};
pub use tick::{TickInput, tick};
