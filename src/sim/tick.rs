//! Per-tick simulation step and state machine
//!
//! One tick runs to completion before the next is scheduled: sample input,
//! move the ship, drift the asteroids, age the projectiles, resolve hits,
//! then evaluate the terminal and level-complete conditions. Side effects
//! (sounds, session mutations worth announcing) come back as events for the
//! orchestration layer to dispatch; nothing here touches storage or audio.

use super::collision::{detect_projectile_hits, detect_ship_hit};
use super::input::InputState;
use super::kinematics::step_wrapped;
use super::state::{GamePhase, GameState, Projectile};
use crate::audio::SoundId;
use crate::consts::*;
use crate::heading_vec;

/// Something that happened during a tick that the outside world cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Fire-and-forget sound request
    Sound(SoundId),
    /// Ship destroyed by an asteroid; carries the remaining lives
    ShipDestroyed { lives: u8 },
    /// Projectile destroyed an asteroid of the given pre-hit radius
    AsteroidDestroyed { radius: f32 },
    /// Field cleared; a new level just spawned
    LevelStarted { level: u32 },
    /// Lives ran out; no further ticks advance until reset
    GameOver,
}

/// Advance the game by one tick. A no-op unless the phase is Running; a
/// tick always completes, it never panics mid-update.
pub fn tick(state: &mut GameState, input: &mut InputState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    state.time_ticks += 1;

    update_ship(state, input, &mut events);
    update_asteroids(state);
    update_projectiles(state);
    resolve_collisions(state, &mut events);

    // Terminal condition first: a final-life ship death respawned the
    // field, so it must not also count as a cleared level.
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("game over at level {} with score {}", state.level, state.score);
        events.push(GameEvent::GameOver);
        return events;
    }

    if state.asteroids.is_empty() {
        state.level += 1;
        state.reset_ship();
        state.spawn_field();
        state.projectiles.clear();
        input.clear();
        log::info!("level {} cleared, starting level {}", state.level - 1, state.level);
        events.push(GameEvent::LevelStarted { level: state.level });
    }

    events
}

fn update_ship(state: &mut GameState, input: &mut InputState, events: &mut Vec<GameEvent>) {
    if input.rotate_left() {
        state.ship.heading -= SHIP_ROTATION_RATE;
    }
    if input.rotate_right() {
        state.ship.heading += SHIP_ROTATION_RATE;
    }
    if input.thrust() {
        state.ship.vel += heading_vec(state.ship.heading) * SHIP_THRUST_ACCEL;
        // Thrust rumbles every tick it is held, not just on press
        events.push(GameEvent::Sound(SoundId::Thrust));
    }
    if input.take_fire() {
        state.projectiles.push(Projectile::fired_from(&state.ship));
        events.push(GameEvent::Sound(SoundId::Fire));
    }

    // Drag, then cap speed preserving direction
    state.ship.vel *= SHIP_DAMPING;
    let speed = state.ship.vel.length();
    if speed > SHIP_MAX_SPEED {
        state.ship.vel = state.ship.vel / speed * SHIP_MAX_SPEED;
    }

    state.ship.pos = step_wrapped(state.ship.pos, state.ship.vel, &state.arena);
}

fn update_asteroids(state: &mut GameState) {
    let arena = state.arena;
    for rock in &mut state.asteroids {
        rock.pos = step_wrapped(rock.pos, rock.vel, &arena);
    }
}

fn update_projectiles(state: &mut GameState) {
    let arena = state.arena;
    state.projectiles.retain_mut(|shot| {
        shot.pos += shot.vel;
        shot.life = shot.life.saturating_sub(1);
        shot.life > 0 && arena.contains(shot.pos)
    });
}

fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // Ship vs asteroid: first match wins, one hit per tick. The hit clears
    // and respawns the field, so the projectile pass below has nothing
    // stale left to chew on.
    if detect_ship_hit(&state.ship, &state.asteroids).is_some() {
        state.lives = state.lives.saturating_sub(1);
        state.reset_ship();
        state.asteroids.clear();
        state.projectiles.clear();
        state.spawn_field();
        events.push(GameEvent::Sound(SoundId::BangLarge));
        events.push(GameEvent::ShipDestroyed { lives: state.lives });
        return;
    }

    let hits = detect_projectile_hits(&state.projectiles, &state.asteroids);
    if hits.is_empty() {
        return;
    }

    let mut dead_shots = vec![false; state.projectiles.len()];
    let mut dead_rocks = vec![false; state.asteroids.len()];
    let mut children = Vec::new();

    for hit in &hits {
        dead_shots[hit.projectile] = true;
        dead_rocks[hit.asteroid] = true;
        state.score += SCORE_PER_ASTEROID;

        let rock = state.asteroids[hit.asteroid].clone();
        let sound = if rock.radius > SPLIT_RADIUS {
            children.extend(rock.split_children(&mut state.rng));
            SoundId::BangLarge
        } else if rock.radius > MEDIUM_BANG_RADIUS {
            SoundId::BangMedium
        } else {
            SoundId::BangSmall
        };
        events.push(GameEvent::Sound(sound));
        events.push(GameEvent::AsteroidDestroyed { radius: rock.radius });
    }

    // Rebuild the retained sets instead of splicing mid-scan
    let mut keep = dead_shots.iter().map(|dead| !dead);
    state.projectiles.retain(|_| keep.next().unwrap_or(true));
    let mut keep = dead_rocks.iter().map(|dead| !dead);
    state.asteroids.retain(|_| keep.next().unwrap_or(true));
    state.asteroids.append(&mut children);
}
