//! Per-frame simulation step
//!
//! One call advances the run by exactly one display frame: monsters patrol,
//! the player integrates, collisions resolve, then the camera follows.

use super::camera::update_camera;
use super::collision::resolve_collisions;
use super::level::Level;
use super::patrol::advance_patrol;
use super::physics::integrate_player;
use super::state::{SimState, StepOutcome};
use crate::tuning::Tuning;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Advance the simulation by one frame and report any terminal outcome.
///
/// The caller decides what a `Won`/`Lost` outcome means; this function never
/// stops on its own and keeps stepping if called again.
pub fn tick(
    state: &mut SimState,
    level: &Level,
    input: &TickInput,
    tuning: &Tuning,
    jump_modifier: f32,
) -> StepOutcome {
    state.time_ticks += 1;

    for monster in &mut state.monsters {
        advance_patrol(monster);
    }

    integrate_player(&mut state.player, input, &tuning.physics, jump_modifier);

    let void_y = level.height + tuning.void_margin;
    let outcome = resolve_collisions(&mut state.player, level, &state.monsters, void_y);

    update_camera(
        &mut state.camera,
        &state.player,
        &tuning.camera,
        level.width,
        level.height,
    );

    state.player.frame = state.player.frame.wrapping_add(1);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{EntityKind, LevelEntity};

    fn entity(id: &str, kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> LevelEntity {
        LevelEntity {
            id: id.into(),
            x,
            y,
            w,
            h,
            kind,
        }
    }

    /// Start at y=350 above a 200-wide platform at y=400
    fn ledge_level() -> Level {
        Level {
            width: 2000.0,
            height: 800.0,
            entities: vec![
                entity("start", EntityKind::Start, 50.0, 350.0, 0.0, 0.0),
                entity("ledge", EntityKind::Platform, 0.0, 400.0, 200.0, 50.0),
                entity("goal", EntityKind::Goal, 1900.0, 300.0, 50.0, 100.0),
            ],
        }
    }

    #[test]
    fn test_player_settles_on_platform() {
        let level = ledge_level();
        let tuning = Tuning::default();
        let mut state = SimState::new(&level).unwrap();

        for _ in 0..120 {
            let outcome = tick(&mut state, &level, &TickInput::default(), &tuning, 1.0);
            assert_eq!(outcome, StepOutcome::None);
        }

        let player = &state.player;
        assert_eq!(player.pos.y, 400.0 - player.height);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.is_grounded);
    }

    #[test]
    fn test_grounded_only_in_frames_with_landing() {
        let level = ledge_level();
        let tuning = Tuning::default();
        let mut state = SimState::new(&level).unwrap();

        // Falling toward the ledge: not grounded until contact
        tick(&mut state, &level, &TickInput::default(), &tuning, 1.0);
        assert!(!state.player.is_grounded);

        for _ in 0..60 {
            tick(&mut state, &level, &TickInput::default(), &tuning, 1.0);
        }
        assert!(state.player.is_grounded);

        // The jump frame leaves the ledge; no landing means no grounding
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &level, &jump, &tuning, 1.0);
        assert!(!state.player.is_grounded);
        assert!(state.player.vel.y < 0.0);
    }

    #[test]
    fn test_walking_off_ledge_falls_into_void() {
        let level = ledge_level();
        let tuning = Tuning::default();
        let mut state = SimState::new(&level).unwrap();
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };

        let mut outcome = StepOutcome::None;
        for _ in 0..600 {
            outcome = tick(&mut state, &level, &right, &tuning, 1.0);
            if outcome.is_terminal() {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::Lost);
        assert!(state.player.pos.y > level.height);
    }

    #[test]
    fn test_jump_modifier_scales_jump_height() {
        let level = ledge_level();
        let tuning = Tuning::default();

        let apex = |modifier: f32| {
            let mut state = SimState::new(&level).unwrap();
            for _ in 0..60 {
                tick(&mut state, &level, &TickInput::default(), &tuning, modifier);
            }
            let jump = TickInput {
                jump: true,
                ..Default::default()
            };
            let mut highest = state.player.pos.y;
            for _ in 0..120 {
                tick(&mut state, &level, &jump, &tuning, modifier);
                highest = highest.min(state.player.pos.y);
            }
            highest
        };

        assert!(apex(2.0) < apex(1.0));
        assert!(apex(1.0) < apex(0.5));
    }

    #[test]
    fn test_reaching_goal_wins() {
        let level = Level {
            width: 1000.0,
            height: 800.0,
            entities: vec![
                entity("start", EntityKind::Start, 50.0, 352.0, 0.0, 0.0),
                entity("floor", EntityKind::Platform, 0.0, 400.0, 1000.0, 50.0),
                entity("goal", EntityKind::Goal, 300.0, 300.0, 50.0, 100.0),
            ],
        };
        let tuning = Tuning::default();
        let mut state = SimState::new(&level).unwrap();
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };

        let won = (0..600).any(|_| tick(&mut state, &level, &right, &tuning, 1.0) == StepOutcome::Won);
        assert!(won);
    }

    #[test]
    fn test_monster_walks_into_player() {
        let level = Level {
            width: 1000.0,
            height: 800.0,
            entities: vec![
                entity("start", EntityKind::Start, 100.0, 352.0, 0.0, 0.0),
                entity("floor", EntityKind::Platform, 0.0, 400.0, 1000.0, 50.0),
                entity(
                    "m",
                    EntityKind::Monster {
                        patrol_start: 50.0,
                        patrol_end: 400.0,
                        speed: 2.0,
                    },
                    300.0,
                    360.0,
                    40.0,
                    40.0,
                ),
                entity("goal", EntityKind::Goal, 900.0, 300.0, 50.0, 100.0),
            ],
        };
        let tuning = Tuning::default();
        let mut state = SimState::new(&level).unwrap();

        let lost = (0..600).any(|_| {
            tick(&mut state, &level, &TickInput::default(), &tuning, 1.0) == StepOutcome::Lost
        });
        assert!(lost);
    }

    #[test]
    fn test_determinism() {
        let level = Level::builtin().unwrap();
        let tuning = Tuning::default();
        let mut first = SimState::new(&level).unwrap();
        let mut second = SimState::new(&level).unwrap();

        let inputs = [
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_left: true,
                ..Default::default()
            },
        ];

        for i in 0..400 {
            let input = &inputs[(i / 25) % inputs.len()];
            let a = tick(&mut first, &level, input, &tuning, 1.2);
            let b = tick(&mut second, &level, input, &tuning, 1.2);
            assert_eq!(a, b);
        }
        assert_eq!(first, second);
    }
}
