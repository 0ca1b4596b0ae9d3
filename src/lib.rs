//! Side Scroller - a canvas platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, patrol, camera)
//! - `session`: Game status state machine, timer and completion data
//! - `score`: Time-based scoring
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input mapping
//! - `settings`: Persisted player preferences
//! - `tuning`: Data-driven physics and camera constants

pub mod platform;
pub mod renderer;
pub mod score;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use score::calculate_points;
pub use session::{CompletionData, GameStatus, Session};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;

    /// Jump modifier range exposed by the HUD slider
    pub const JUMP_MODIFIER_MIN: f32 = 0.5;
    pub const JUMP_MODIFIER_MAX: f32 = 2.0;

    /// Frames per walk-cycle pose
    pub const WALK_FRAME_TICKS: u32 = 8;
}

/// Axis-aligned rectangle in world units (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    /// Open-interval overlap: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Penetration depth on each axis (sum of half-extents minus center distance).
    /// Both components are positive exactly when the rectangles overlap.
    #[inline]
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        let delta = (self.center() - other.center()).abs();
        self.half_extents() + other.half_extents() - delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn test_penetration_depth() {
        let player = Rect::new(0.0, 0.0, 32.0, 48.0);
        let platform = Rect::new(-50.0, 46.0, 200.0, 50.0);
        let pen = player.penetration(&platform);
        // 2 units deep vertically, fully inside horizontally
        assert!((pen.y - 2.0).abs() < 1e-4);
        assert!(pen.x > pen.y);
    }
}
