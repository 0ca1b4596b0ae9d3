//! Data-driven tuning
//!
//! Physics and camera constants live here rather than in code paths so they can
//! be loaded from JSON and tweaked without touching the simulation.

use serde::{Deserialize, Serialize};

/// Per-frame physics constants. Units are world units per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vy every frame
    pub gravity: f32,
    /// Multiplicative horizontal damping applied every frame
    pub friction: f32,
    /// Horizontal acceleration while a direction is held
    pub move_speed: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Jump impulse (negative = upward), scaled by the jump modifier
    pub base_jump_force: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.85,
            move_speed: 0.8,
            max_speed: 8.0,
            base_jump_force: -12.0,
        }
    }
}

/// Camera framing and smoothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Vertical offset used while the player is at ground level
    pub ground_offset: f32,
    /// Climbing-follow starts when the player rises above this fraction of the viewport height
    pub climb_fraction: f32,
    /// Falling-follow starts when the player drops below this fraction of the viewport height
    pub pit_fraction: f32,
    /// Per-frame blend factor toward the target (0..1)
    pub smoothing_x: f32,
    pub smoothing_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            ground_offset: 0.0,
            climb_fraction: 0.25,
            pit_fraction: 0.9,
            smoothing_x: 0.1,
            smoothing_y: 0.05,
        }
    }
}

impl CameraConfig {
    /// World y above which the camera starts climbing with the player
    pub fn climb_threshold(&self) -> f32 {
        self.ground_offset + self.viewport_height * self.climb_fraction
    }

    /// World y below which the camera starts following the player down
    pub fn pit_threshold(&self) -> f32 {
        self.ground_offset + self.viewport_height * self.pit_fraction
    }
}

/// All tuning knobs for a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    /// How far below the level floor the player may fall before the run is lost
    pub void_margin: f32,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
