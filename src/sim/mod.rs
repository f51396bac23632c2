//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer tick stepping only (velocities are units per tick)
//! - Seeded RNG only
//! - No side effects: sounds and session changes are reported as events,
//!   storage/audio/rendering happen in the orchestration layer

pub mod collision;
pub mod input;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use collision::{ProjectileHit, ShipHit, detect_projectile_hits, detect_ship_hit};
pub use input::{Control, InputEvent, InputState};
pub use kinematics::{Arena, step_wrapped, wrap_coord};
pub use state::{Asteroid, GamePhase, GameState, Projectile, Ship};
pub use tick::{GameEvent, tick};
