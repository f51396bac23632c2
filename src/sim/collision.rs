//! Pure collision detection
//!
//! Detection only reports which entities collided; applying the effects
//! (scoring, sounds, respawns) is the tick's job. That keeps this module
//! testable without storage or audio in the picture.

use super::state::{Asteroid, Projectile, Ship};
use crate::consts::SHIP_RADIUS;

/// The ship overlapped an asteroid this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipHit {
    /// Index into the asteroid set
    pub asteroid: usize,
}

/// A projectile passed inside an asteroid this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: usize,
    pub asteroid: usize,
}

/// First asteroid overlapping the ship, in iteration order. At most one hit
/// is reported per tick even when several asteroids overlap the ship.
pub fn detect_ship_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<ShipHit> {
    asteroids
        .iter()
        .position(|rock| ship.pos.distance(rock.pos) < SHIP_RADIUS + rock.radius)
        .map(|asteroid| ShipHit { asteroid })
}

/// All projectile/asteroid hits for this tick. Each projectile is consumed
/// by its first match, and an asteroid claimed by one projectile is dead to
/// the rest, so every entity appears in at most one hit.
pub fn detect_projectile_hits(
    projectiles: &[Projectile],
    asteroids: &[Asteroid],
) -> Vec<ProjectileHit> {
    let mut claimed = vec![false; asteroids.len()];
    let mut hits = Vec::new();

    for (pi, shot) in projectiles.iter().enumerate() {
        for (ai, rock) in asteroids.iter().enumerate() {
            if claimed[ai] {
                continue;
            }
            if shot.pos.distance(rock.pos) < rock.radius {
                claimed[ai] = true;
                hits.push(ProjectileHit {
                    projectile: pi,
                    asteroid: ai,
                });
                break;
            }
        }
    }

    hits
}
