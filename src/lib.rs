//! Toroids - an Asteroids-style arcade core on a toroidal arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `session`: Persisted session fields and the storage interface
//! - `audio`: Fire-and-forget sound interface
//! - `render`: Frame snapshots for an external renderer
//! - `game`: Orchestration layer (control surface, session bridge)

pub mod audio;
pub mod game;
pub mod render;
pub mod session;
pub mod sim;

pub use audio::{AudioManager, SoundId};
pub use game::Game;
pub use session::{MemoryStore, SessionState, SessionStore};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (toroidal wraparound boundary)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship collision radius
    pub const SHIP_RADIUS: f32 = 20.0;
    /// Heading change per tick while a rotate control is held (radians)
    pub const SHIP_ROTATION_RATE: f32 = 0.1;
    /// Acceleration along the heading per tick while thrust is held
    pub const SHIP_THRUST_ACCEL: f32 = 0.3;
    /// Per-tick velocity damping factor (drag)
    pub const SHIP_DAMPING: f32 = 0.98;
    /// Speed cap; velocity is rescaled to this magnitude when exceeded
    pub const SHIP_MAX_SPEED: f32 = 5.0;

    /// Projectile muzzle speed (units per tick)
    pub const PROJECTILE_SPEED: f32 = 8.0;
    /// Projectile lifetime in ticks
    pub const PROJECTILE_LIFETIME: u32 = 60;

    /// Level spawn count is ASTEROID_BASE_COUNT + level
    pub const ASTEROID_BASE_COUNT: u32 = 4;
    /// Freshly spawned asteroid radius range
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 50.0;
    /// Asteroid drift speed range (units per tick)
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;
    /// Minimum distance from the ship for an asteroid spawn point
    pub const SPAWN_CLEARANCE: f32 = 100.0;

    /// Asteroids larger than this split into two children when destroyed
    pub const SPLIT_RADIUS: f32 = 30.0;
    /// Destroyed asteroids larger than this get the medium bang sound
    pub const MEDIUM_BANG_RADIUS: f32 = 15.0;

    /// Score awarded per destroyed asteroid
    pub const SCORE_PER_ASTEROID: u64 = 100;
    /// Lives at the start of a fresh session
    pub const STARTING_LIVES: u8 = 3;

    /// Nominal frame rate of the external scheduler (demo binary)
    pub const FRAME_HZ: u32 = 60;
}

/// Unit vector for a heading angle
#[inline]
pub fn heading_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}
