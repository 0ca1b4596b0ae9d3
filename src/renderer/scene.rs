//! Scene building
//!
//! Turns a simulation snapshot into a triangle list in viewport pixel space.
//! There are no sprite assets; everything is drawn from primitives.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::Rect;
use crate::consts::WALK_FRAME_TICKS;
use crate::sim::{EntityKind, Level, Monster, Player, SimState};

/// Spike width for hazards
const SPIKE_WIDTH: f32 = 20.0;
/// Thickness of the grass strip on platform tops
const PLATFORM_TOP: f32 = 6.0;
/// Minimum horizontal speed that animates the walk cycle
const WALK_SPEED: f32 = 0.5;

/// Build the vertex list for one frame
pub fn build_scene(sim: &SimState, level: &Level, viewport: Vec2) -> Vec<Vertex> {
    let camera = sim.camera.pos;
    let mut vertices = Vec::with_capacity(level.entities.len() * 12 + 64);

    let to_screen = |r: Rect| Rect::new(r.x - camera.x, r.y - camera.y, r.w, r.h);
    let visible = |r: &Rect| {
        r.right() > 0.0 && r.x < viewport.x && r.bottom() > 0.0 && r.y < viewport.y
    };

    for entity in &level.entities {
        let r = to_screen(entity.rect());
        if !visible(&r) {
            continue;
        }
        match entity.kind {
            EntityKind::Platform => {
                vertices.extend(shapes::rect(&r, colors::PLATFORM));
                let top = Rect::new(r.x, r.y, r.w, PLATFORM_TOP.min(r.h));
                vertices.extend(shapes::rect(&top, colors::PLATFORM_TOP));
            }
            EntityKind::Hazard => {
                vertices.extend(shapes::spikes(&r, SPIKE_WIDTH, colors::HAZARD));
            }
            EntityKind::Goal => {
                let pole = Rect::new(r.x, r.y, (r.w * 0.15).max(2.0), r.h);
                let flag = Rect::new(pole.right(), r.y, r.w - pole.w, r.h * 0.4);
                vertices.extend(shapes::rect(&pole, colors::GOAL_POLE));
                vertices.extend(shapes::rect(&flag, colors::GOAL_FLAG));
            }
            // Live monsters are drawn from simulation state below
            EntityKind::Start | EntityKind::Monster { .. } => {}
        }
    }

    for monster in &sim.monsters {
        let r = to_screen(monster.rect());
        if visible(&r) {
            vertices.extend(monster_shape(monster, &r));
        }
    }

    let r = to_screen(sim.player.rect());
    if visible(&r) {
        vertices.extend(player_shape(&sim.player, &r));
    }

    vertices
}

fn monster_shape(monster: &Monster, r: &Rect) -> Vec<Vertex> {
    let mut vertices = shapes::rect(r, colors::MONSTER);
    let dir = monster.vx.signum();
    let eye_y = r.y + r.h * 0.3;
    let center_x = r.x + r.w / 2.0;
    let radius = r.w * 0.1;
    for offset in [-0.15, 0.2] {
        let eye = Vec2::new(center_x + dir * offset * r.w, eye_y);
        vertices.extend(shapes::circle(eye, radius, colors::EYE, 8));
    }
    vertices
}

fn player_shape(player: &Player, r: &Rect) -> Vec<Vertex> {
    let leg_h = r.h * 0.25;
    let body = Rect::new(r.x, r.y, r.w, r.h - leg_h);
    let mut vertices = shapes::rect(&body, colors::PLAYER);

    let walking = player.is_grounded && player.vel.x.abs() > WALK_SPEED;
    let stride = if walking && (player.frame / WALK_FRAME_TICKS) % 2 == 1 {
        r.w * 0.12
    } else {
        0.0
    };
    let leg_w = r.w * 0.3;
    let legs = [
        Rect::new(r.x + r.w * 0.1 - stride, body.bottom(), leg_w, leg_h),
        Rect::new(r.right() - r.w * 0.1 - leg_w + stride, body.bottom(), leg_w, leg_h),
    ];
    for leg in &legs {
        vertices.extend(shapes::rect(leg, colors::PLAYER_LEGS));
    }

    let eye = Vec2::new(
        r.x + r.w / 2.0 + player.facing.sign() * r.w * 0.25,
        r.y + body.h * 0.3,
    );
    vertices.extend(shapes::circle(eye, r.w * 0.1, colors::EYE, 8));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_scene_is_camera_relative() {
        let level = Level::builtin().unwrap();
        let mut sim = SimState::new(&level).unwrap();
        sim.camera.pos = Vec2::ZERO;
        let before = build_scene(&sim, &level, viewport());

        sim.camera.pos = Vec2::new(10.0, 0.0);
        let after = build_scene(&sim, &level, viewport());

        assert_eq!(before.len(), after.len());
        let dx = before[0].position[0] - after[0].position[0];
        assert!((dx - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let level = Level::builtin().unwrap();
        let mut sim = SimState::new(&level).unwrap();
        let near_start = build_scene(&sim, &level, viewport()).len();

        // Nothing exists this far up
        sim.camera.pos = Vec2::new(0.0, -5000.0);
        let empty = build_scene(&sim, &level, viewport());
        assert!(empty.is_empty());
        assert!(near_start > 0);
    }

    #[test]
    fn test_player_drawn_in_view() {
        let level = Level::builtin().unwrap();
        let sim = SimState::new(&level).unwrap();
        let verts = build_scene(&sim, &level, viewport());
        assert!(verts.iter().any(|v| v.color == colors::PLAYER));
        assert!(verts.iter().any(|v| v.color == colors::PLATFORM));
    }
}
