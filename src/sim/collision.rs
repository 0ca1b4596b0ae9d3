//! Collision detection and response for axis-aligned rectangles
//!
//! Resolution runs once per frame after integration. Entities are visited in
//! level order and each overlap is resolved on its own (no global solver), so
//! a player wedged between two platforms is pushed by each in turn.

use super::level::{EntityKind, Level};
use super::state::{Monster, Player, StepOutcome};
use crate::Rect;

/// Which side of a platform the player was pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on the top surface
    Top,
    /// Bumped the underside
    Bottom,
    /// Pushed out to the left edge
    Left,
    /// Pushed out to the right edge
    Right,
}

/// Clamp the player horizontally to [0, level_width]. Returns true if clamped.
pub fn clamp_to_world(player: &mut Player, level_width: f32) -> bool {
    let clamped = player.pos.x.max(0.0).min(level_width);
    if clamped != player.pos.x {
        player.pos.x = clamped;
        player.vel.x = 0.0;
        return true;
    }
    false
}

/// Push the player out of a platform along the axis of least penetration.
///
/// Returns None when the rectangles do not overlap.
pub fn resolve_platform(player: &mut Player, platform: &Rect) -> Option<Contact> {
    let body = player.rect();
    if !body.overlaps(platform) {
        return None;
    }

    let overlap = body.penetration(platform);

    let contact = if overlap.x < overlap.y {
        let push_left = if player.vel.x > 0.0 {
            true
        } else if player.vel.x < 0.0 {
            false
        } else {
            // At rest: back out the way we are already leaning
            body.center().x < platform.center().x
        };

        player.vel.x = 0.0;
        if push_left {
            player.pos.x = platform.x - player.width;
            Contact::Left
        } else {
            player.pos.x = platform.right();
            Contact::Right
        }
    } else if player.vel.y > 0.0 {
        player.pos.y = platform.y - player.height;
        player.vel.y = 0.0;
        player.is_grounded = true;
        Contact::Top
    } else {
        player.pos.y = platform.bottom();
        player.vel.y = 0.0;
        Contact::Bottom
    };

    Some(contact)
}

/// Resolve the player against the world, static entities and monsters.
///
/// Terminal outcomes stop resolution immediately; the first one reached in
/// level order is the one reported.
pub fn resolve_collisions(
    player: &mut Player,
    level: &Level,
    monsters: &[Monster],
    void_y: f32,
) -> StepOutcome {
    player.is_grounded = false;

    clamp_to_world(player, level.width);

    if player.pos.y > void_y {
        return StepOutcome::Lost;
    }

    for entity in &level.entities {
        match entity.kind {
            EntityKind::Start | EntityKind::Monster { .. } => continue,
            EntityKind::Hazard => {
                if player.rect().overlaps(&entity.rect()) {
                    return StepOutcome::Lost;
                }
            }
            EntityKind::Goal => {
                if player.rect().overlaps(&entity.rect()) {
                    return StepOutcome::Won;
                }
            }
            EntityKind::Platform => {
                resolve_platform(player, &entity.rect());
            }
        }
    }

    let body = player.rect();
    if monsters.iter().any(|m| body.overlaps(&m.rect())) {
        return StepOutcome::Lost;
    }

    StepOutcome::None
}
