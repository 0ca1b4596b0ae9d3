//! Player physics integration
//!
//! One call per frame. Velocity and position are updated here; overlaps this
//! creates are corrected afterwards by collision resolution.

use super::state::{Facing, Player};
use super::tick::TickInput;
use crate::tuning::PhysicsConfig;

/// Advance player velocity and position by one frame
pub fn integrate_player(
    player: &mut Player,
    input: &TickInput,
    config: &PhysicsConfig,
    jump_modifier: f32,
) {
    if input.move_left {
        player.vel.x -= config.move_speed;
        player.facing = Facing::Left;
    }
    if input.move_right {
        player.vel.x += config.move_speed;
        player.facing = Facing::Right;
    }

    // Decay, not a hard stop
    player.vel.x *= config.friction;
    player.vel.x = player.vel.x.max(-config.max_speed).min(config.max_speed);

    player.vel.y += config.gravity;

    if input.jump && player.is_grounded {
        player.vel.y = config.base_jump_force * jump_modifier;
        player.is_grounded = false;
    }

    player.pos += player.vel;
}
