//! Enemy patrol movement

use super::state::Monster;

/// Move a monster one frame along its patrol, turning around at the bounds.
///
/// A monster that reaches or passes a bound is placed exactly on it and its
/// velocity is pointed back into the patrol range.
pub fn advance_patrol(monster: &mut Monster) {
    monster.x += monster.vx;

    if monster.x >= monster.patrol_end {
        monster.x = monster.patrol_end;
        monster.vx = -monster.speed;
    } else if monster.x <= monster.patrol_start {
        monster.x = monster.patrol_start;
        monster.vx = monster.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn monster(x: f32, start: f32, end: f32, speed: f32) -> Monster {
        Monster {
            id: "m".into(),
            x,
            y: 0.0,
            width: 40.0,
            height: 40.0,
            vx: speed,
            patrol_start: start,
            patrol_end: end,
            speed,
        }
    }

    #[test]
    fn test_clamps_and_reverses_at_end() {
        let mut m = monster(99.0, 0.0, 100.0, 3.0);
        advance_patrol(&mut m);
        assert_eq!(m.x, 100.0);
        assert_eq!(m.vx, -3.0);

        advance_patrol(&mut m);
        assert_eq!(m.x, 97.0);
        assert_eq!(m.vx, -3.0);
    }

    #[test]
    fn test_clamps_and_reverses_at_start() {
        let mut m = monster(1.0, 0.0, 100.0, 3.0);
        m.vx = -3.0;
        advance_patrol(&mut m);
        assert_eq!(m.x, 0.0);
        assert_eq!(m.vx, 3.0);
    }

    #[test]
    fn test_full_cycle_returns_to_origin() {
        // 100 units at speed 2: 50 frames out, 50 frames back
        let mut m = monster(0.0, 0.0, 100.0, 2.0);
        for _ in 0..100 {
            advance_patrol(&mut m);
        }
        assert_eq!(m.x, 0.0);
        assert_eq!(m.vx, 2.0);
    }

    proptest! {
        #[test]
        fn prop_patrol_stays_in_bounds_and_flips_only_at_bounds(
            start in -1000.0f32..1000.0,
            span in 1.0f32..500.0,
            speed in 0.1f32..20.0,
            frames in 1usize..600,
        ) {
            let end = start + span;
            let mut m = monster(start, start, end, speed);
            for _ in 0..frames {
                let before = m.vx;
                advance_patrol(&mut m);
                prop_assert!(m.x >= start && m.x <= end);
                prop_assert_eq!(m.vx.abs(), speed);
                if m.vx != before {
                    prop_assert!(m.x == start || m.x == end);
                }
            }
        }
    }
}
