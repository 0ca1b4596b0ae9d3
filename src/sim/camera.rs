//! Scrolling camera
//!
//! Horizontally the camera keeps the player centered. Vertically it has three
//! regimes: locked at ground level, following a climbing player, and following
//! a player falling into a pit. Both axes ease toward their target.

use glam::Vec2;

use super::state::{Camera, Player};
use crate::tuning::CameraConfig;

/// Where the camera wants to be this frame
pub fn camera_target(
    player: &Player,
    config: &CameraConfig,
    level_width: f32,
    level_height: f32,
) -> Vec2 {
    let max_x = (level_width - config.viewport_width).max(0.0);
    let x = (player.pos.x + player.width / 2.0 - config.viewport_width / 2.0)
        .max(0.0)
        .min(max_x);

    let climb = config.climb_threshold();
    let pit = config.pit_threshold();
    let y = if player.pos.y < climb {
        config.ground_offset + (player.pos.y - climb)
    } else if player.pos.y > pit {
        config.ground_offset + (player.pos.y - pit)
    } else {
        config.ground_offset
    };

    // Never reveal anything below the level floor
    let y = y.min(level_height - config.viewport_height);

    Vec2::new(x, y)
}

/// Ease the camera one frame toward its target
pub fn update_camera(
    camera: &mut Camera,
    player: &Player,
    config: &CameraConfig,
    level_width: f32,
    level_height: f32,
) {
    let target = camera_target(player, config, level_width, level_height);
    let smoothing = Vec2::new(config.smoothing_x, config.smoothing_y);
    camera.pos += (target - camera.pos) * smoothing;
}
