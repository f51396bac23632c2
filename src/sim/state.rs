//! Entities, factories, and the per-instance game state

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::kinematics::Arena;
use crate::consts::*;
use crate::heading_vec;

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not running, not over; start or reset leave ticks paused here
    Idle,
    /// Ticks advance
    Running,
    /// Terminal until an explicit reset
    GameOver,
}

/// The player's ship. One per game; respawns in place at arena center.
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading angle in radians
    pub heading: f32,
    pub vel: Vec2,
}

impl Ship {
    /// Ship at arena center, facing right, at rest
    pub fn centered(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            heading: 0.0,
            vel: Vec2::ZERO,
        }
    }
}

/// A drifting rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Asteroid {
    /// Spawn at a point with a uniformly random heading and a speed in
    /// [ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED)
    pub fn spawn(pos: Vec2, radius: f32, rng: &mut Pcg32) -> Self {
        debug_assert!(radius > 0.0, "asteroid radius must be positive");
        let heading = rng.random_range(0.0..TAU);
        let speed = rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        Self {
            pos,
            vel: heading_vec(heading) * speed,
            radius,
        }
    }

    /// Children produced when this asteroid is destroyed: two half-radius
    /// rocks at the parent's position if the parent is large enough to
    /// split, otherwise none. Each child rolls its own heading and speed.
    pub fn split_children(&self, rng: &mut Pcg32) -> Vec<Asteroid> {
        if self.radius > SPLIT_RADIUS {
            (0..2)
                .map(|_| Asteroid::spawn(self.pos, self.radius / 2.0, rng))
                .collect()
        } else {
            Vec::new()
        }
    }
}

/// A fired shot; expires by lifetime or by leaving the arena
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
}

impl Projectile {
    pub fn fired_from(ship: &Ship) -> Self {
        Self {
            pos: ship.pos,
            vel: heading_vec(ship.heading) * PROJECTILE_SPEED,
            life: PROJECTILE_LIFETIME,
        }
    }
}

/// One independent game instance. The simulation loop exclusively owns the
/// live entity sets; score/lives/level are mirrored to external storage by
/// the orchestration layer after each tick.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Instance seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub arena: Arena,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session: score 0, full lives, level 1, Idle, level-1 field
    pub fn new(seed: u64) -> Self {
        Self::resume(seed, 0, STARTING_LIVES, 1)
    }

    /// Resume a persisted session at the given score/lives/level
    pub fn resume(seed: u64, score: u64, lives: u8, level: u32) -> Self {
        let arena = Arena::default();
        let mut state = Self {
            seed,
            phase: GamePhase::Idle,
            score,
            lives,
            level: level.max(1),
            time_ticks: 0,
            ship: Ship::centered(&arena),
            arena,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_field();
        state
    }

    /// Asteroids spawned at the start of a level
    pub fn asteroid_count_for_level(level: u32) -> usize {
        (ASTEROID_BASE_COUNT + level) as usize
    }

    /// Replace the asteroid set with a full field for the current level.
    /// Spawn points are rejection-sampled until they clear the ship.
    pub fn spawn_field(&mut self) {
        let count = Self::asteroid_count_for_level(self.level);
        let mut field = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = self.sample_spawn_point();
            let radius = self
                .rng
                .random_range(ASTEROID_MIN_RADIUS..ASTEROID_MAX_RADIUS);
            field.push(Asteroid::spawn(pos, radius, &mut self.rng));
        }
        self.asteroids = field;
    }

    fn sample_spawn_point(&mut self) -> Vec2 {
        loop {
            let pos = Vec2::new(
                self.rng.random_range(0.0..self.arena.width),
                self.rng.random_range(0.0..self.arena.height),
            );
            if pos.distance(self.ship.pos) > SPAWN_CLEARANCE {
                return pos;
            }
        }
    }

    /// Put the ship back at arena center with zero velocity and heading
    pub fn reset_ship(&mut self) {
        self.ship = Ship::centered(&self.arena);
    }
}
