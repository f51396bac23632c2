//! Toroidal position integration
//!
//! Positions advance by one velocity step per tick. A coordinate that leaves
//! [0, dimension] re-enters from the opposite edge: below zero snaps to the
//! full dimension, above the dimension snaps to zero.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// The wraparound boundary for all entity positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strict interior test, used for projectile expiry (projectiles do not wrap)
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > 0.0 && pos.x < self.width && pos.y > 0.0 && pos.y < self.height
    }
}

/// Wrap a single coordinate to the opposite edge of its dimension
#[inline]
pub fn wrap_coord(value: f32, dimension: f32) -> f32 {
    if value < 0.0 {
        dimension
    } else if value > dimension {
        0.0
    } else {
        value
    }
}

/// Advance a position by one velocity step with toroidal wraparound
#[inline]
pub fn step_wrapped(pos: Vec2, vel: Vec2, arena: &Arena) -> Vec2 {
    let moved = pos + vel;
    Vec2::new(
        wrap_coord(moved.x, arena.width),
        wrap_coord(moved.y, arena.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wrap_snaps_to_opposite_edge() {
        assert_eq!(wrap_coord(-0.5, 800.0), 800.0);
        assert_eq!(wrap_coord(800.5, 800.0), 0.0);
    }

    #[test]
    fn wrap_leaves_interior_untouched() {
        assert_eq!(wrap_coord(0.0, 800.0), 0.0);
        assert_eq!(wrap_coord(800.0, 800.0), 800.0);
        assert_eq!(wrap_coord(400.0, 800.0), 400.0);
    }

    #[test]
    fn zero_velocity_is_stationary() {
        let arena = Arena::default();
        let pos = Vec2::new(123.0, 456.0);
        assert_eq!(step_wrapped(pos, Vec2::ZERO, &arena), pos);
    }

    #[test]
    fn step_wraps_both_axes() {
        let arena = Arena {
            width: 100.0,
            height: 50.0,
        };
        let wrapped = step_wrapped(Vec2::new(99.0, 1.0), Vec2::new(5.0, -5.0), &arena);
        assert_eq!(wrapped, Vec2::new(0.0, 50.0));
    }

    proptest! {
        #[test]
        fn wrapped_coord_stays_in_bounds(v in -500.0f32..1500.0, d in 1.0f32..2000.0) {
            let wrapped = wrap_coord(v, d);
            prop_assert!((0.0..=d).contains(&wrapped));
        }

        #[test]
        fn in_bounds_coord_is_identity(d in 1.0f32..2000.0, t in 0.0f32..=1.0) {
            let v = d * t;
            prop_assert_eq!(wrap_coord(v, d), v);
        }
    }
}
