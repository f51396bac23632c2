//! Frame snapshots for an external renderer
//!
//! The core never draws pixels. Each frame it exposes what must be visually
//! representable - the ship as an oriented triangle, asteroids as circles
//! sized by radius, projectiles as dots, and the game-over overlay flag -
//! and a host renderer turns that into an actual frame.

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

/// Oriented triangle for the ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipSprite {
    pub pos: Vec2,
    /// Heading angle in radians; the triangle points along this
    pub heading: f32,
}

/// Circle sized by asteroid radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSprite {
    pub pos: Vec2,
    pub radius: f32,
}

/// Small dot for a projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotSprite {
    pub pos: Vec2,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub ship: ShipSprite,
    pub asteroids: Vec<CircleSprite>,
    pub projectiles: Vec<DotSprite>,
    /// Show the "GAME OVER" overlay
    pub game_over: bool,
    /// HUD fields
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            ship: ShipSprite {
                pos: state.ship.pos,
                heading: state.ship.heading,
            },
            asteroids: state
                .asteroids
                .iter()
                .map(|rock| CircleSprite {
                    pos: rock.pos,
                    radius: rock.radius,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|shot| DotSprite { pos: shot.pos })
                .collect(),
            game_over: state.phase == GamePhase::GameOver,
            score: state.score,
            lives: state.lives,
            level: state.level,
        }
    }
}

/// External renderer. Failures must stay inside the implementation; the
/// loop hands over a snapshot and moves on.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Renderer that discards frames (tests, headless hosts)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameSnapshot) {}
}

/// One log line per frame, for headless demo runs
#[derive(Debug, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        if frame.game_over {
            log::info!(
                "GAME OVER | score {} level {} - reset to play again",
                frame.score,
                frame.level
            );
            return;
        }
        log::info!(
            "score {:>6} lives {} level {} | ship ({:6.1},{:6.1}) | {} rocks, {} shots",
            frame.score,
            frame.lives,
            frame.level,
            frame.ship.pos.x,
            frame.ship.pos.y,
            frame.asteroids.len(),
            frame.projectiles.len(),
        );
    }
}
