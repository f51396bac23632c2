//! Orchestration layer
//!
//! `Game` is the instance handle a host creates and drives: it owns the
//! simulation state, buffers raw input edges between ticks, dispatches
//! sounds, and mirrors session fields to external storage after every
//! mutation. Multiple independent instances are fine; there is no process
//! state here.

use crate::audio::AudioManager;
use crate::render::FrameSnapshot;
use crate::session::{SessionPatch, SessionState, SessionStore};
use crate::sim::{GameEvent, GamePhase, GameState, InputEvent, InputState, tick};

pub struct Game {
    state: GameState,
    input: InputState,
    /// Raw edges buffered between ticks, applied at tick start
    pending_input: Vec<InputEvent>,
    store: Box<dyn SessionStore>,
    audio: AudioManager,
    /// Last session view successfully mirrored to the store
    last_synced: SessionState,
    /// Pending-change flag for external observers
    changed: bool,
}

impl Game {
    /// Build an instance, resuming score/lives/level from the store.
    /// Unreadable or inconsistent persisted state falls back to a fresh
    /// session; a finished session (game over, no lives) starts over.
    pub fn new(seed: u64, store: Box<dyn SessionStore>, audio: AudioManager) -> Self {
        let loaded = store.load().unwrap_or_else(|e| {
            log::warn!("could not read session state ({e}), using defaults");
            SessionState::default()
        });
        let session = if !loaded.is_consistent() {
            log::warn!("persisted session claims running and over at once, using defaults");
            SessionState::default()
        } else if loaded.game_over || loaded.lives == 0 {
            SessionState::default()
        } else {
            loaded
        };

        let mut game = Self {
            state: GameState::resume(seed, session.score, session.lives, session.level),
            input: InputState::default(),
            pending_input: Vec::new(),
            store,
            audio,
            last_synced: loaded,
            changed: false,
        };
        // Construction lands in Idle; push the corrected flags out
        game.sync_session();
        game
    }

    /// Idle -> Running. A no-op while already Running or after game over;
    /// only reset leaves the terminal state.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.state.phase = GamePhase::Running;
        log::info!("game started at level {}", self.state.level);
        self.sync_session();
        true
    }

    /// Toggle Running <-> Idle. A no-op after game over.
    pub fn pause(&mut self) -> bool {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Idle,
            GamePhase::Idle => GamePhase::Running,
            GamePhase::GameOver => return false,
        };
        self.sync_session();
        true
    }

    /// Force a fresh Idle session: score 0, full lives, level 1, new
    /// entity sets. Usable whether or not a game was running.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.seed);
        self.input.clear();
        self.pending_input.clear();
        log::info!("session reset");
        self.sync_session();
        // Observers refresh even when the fields already held defaults
        self.changed = true;
    }

    /// Buffer a raw input edge; it takes effect at the next tick start
    pub fn handle_input(&mut self, event: InputEvent) {
        self.pending_input.push(event);
    }

    /// Run one tick. Returns whether the loop should schedule another;
    /// once it returns false the host renders a final frame and halts.
    pub fn advance(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }

        for event in self.pending_input.drain(..) {
            self.input.apply(event);
        }

        let events = tick(&mut self.state, &mut self.input);
        for event in &events {
            match event {
                GameEvent::Sound(id) => self.audio.play(*id),
                GameEvent::ShipDestroyed { lives } => {
                    log::info!("ship destroyed, {lives} lives remain");
                }
                GameEvent::AsteroidDestroyed { radius } => {
                    log::debug!("asteroid destroyed (radius {radius:.0})");
                }
                // tick logs these transitions itself
                GameEvent::LevelStarted { .. } | GameEvent::GameOver => {}
            }
        }

        self.sync_session();
        self.state.phase == GamePhase::Running
    }

    /// Mirror changed session fields to the store. Storage failures are
    /// logged and never interrupt the loop.
    fn sync_session(&mut self) {
        let current = SessionState::from_game(&self.state);
        let patch = SessionPatch::diff(&self.last_synced, &current);
        if patch.is_empty() {
            return;
        }
        // `last_synced` only moves forward once the store took the fields,
        // so a failed write is retried on the next sync
        match self.store.merge(&patch) {
            Ok(()) => self.last_synced = current,
            Err(e) => log::warn!("failed to persist session fields: {e}"),
        }
        self.changed = true;
    }

    /// Consume the pending-change flag. True at most once per observed
    /// change; repeated polls while nothing changed return false.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Current persisted-field view of the session
    pub fn session(&self) -> SessionState {
        SessionState::from_game(&self.state)
    }

    /// Entity snapshot for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts staging custom scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STARTING_LIVES;
    use crate::session::{MemoryStore, StoreError};
    use crate::sim::{Asteroid, Control, GameState};
    use glam::Vec2;
    use serde_json::{Map, json};

    fn quiet_game(store: MemoryStore) -> Game {
        Game::new(7, Box::new(store), AudioManager::disabled())
    }

    /// Store whose first `failures_left` writes are refused by the backend
    struct FlakyStore {
        inner: MemoryStore,
        failures_left: u32,
    }

    impl SessionStore for FlakyStore {
        fn load(&self) -> Result<SessionState, StoreError> {
            self.inner.load()
        }

        fn merge(&mut self, patch: &SessionPatch) -> Result<(), StoreError> {
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(StoreError::Backend("write refused".into()));
            }
            self.inner.merge(patch)
        }
    }

    #[test]
    fn new_game_starts_idle_with_defaults() {
        let game = quiet_game(MemoryStore::new());
        let session = game.session();
        assert_eq!(session, SessionState::default());
        assert_eq!(game.state().phase, GamePhase::Idle);
    }

    #[test]
    fn resumes_persisted_session_fields() {
        let mut fields = Map::new();
        fields.insert("score".into(), json!(400));
        fields.insert("lives".into(), json!(2));
        fields.insert("level".into(), json!(3));
        let game = quiet_game(MemoryStore::with_fields(fields));

        let session = game.session();
        assert_eq!(session.score, 400);
        assert_eq!(session.lives, 2);
        assert_eq!(session.level, 3);
        assert_eq!(
            game.state().asteroids.len(),
            GameState::asteroid_count_for_level(3)
        );
    }

    #[test]
    fn corrupt_store_falls_back_to_defaults() {
        let mut fields = Map::new();
        fields.insert("lives".into(), json!("three"));
        let game = quiet_game(MemoryStore::with_fields(fields));
        assert_eq!(game.session(), SessionState::default());
    }

    #[test]
    fn finished_session_resumes_fresh() {
        let mut fields = Map::new();
        fields.insert("score".into(), json!(1200));
        fields.insert("game_over".into(), json!(true));
        let game = quiet_game(MemoryStore::with_fields(fields));
        assert_eq!(game.session(), SessionState::default());
    }

    #[test]
    fn start_is_idempotent() {
        let mut game = quiet_game(MemoryStore::new());
        assert!(game.start());
        assert!(!game.start());
        assert!(game.session().game_running);
        assert!(game.store().load().unwrap().game_running);
    }

    #[test]
    fn pause_toggles_while_not_over() {
        let mut game = quiet_game(MemoryStore::new());
        game.start();
        assert!(game.pause());
        assert!(!game.session().game_running);
        assert!(game.pause());
        assert!(game.session().game_running);
    }

    #[test]
    fn advance_is_a_noop_until_started() {
        let mut game = quiet_game(MemoryStore::new());
        assert!(!game.advance());
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn buffered_input_applies_at_tick_start() {
        let mut game = quiet_game(MemoryStore::new());
        game.start();
        game.handle_input(InputEvent::down(Control::Fire));
        assert!(game.state().projectiles.is_empty());
        game.advance();
        assert_eq!(game.state().projectiles.len(), 1);
    }

    #[test]
    fn change_flag_clears_exactly_once() {
        let mut game = quiet_game(MemoryStore::new());
        game.take_changed();

        game.start();
        assert!(game.take_changed());
        assert!(!game.take_changed());

        // A quiet tick (nothing persisted changes) raises no flag
        game.advance();
        assert!(!game.take_changed());
    }

    #[test]
    fn storage_failure_never_interrupts_the_loop() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            failures_left: u32::MAX,
        };
        let mut game = Game::new(7, Box::new(store), AudioManager::disabled());
        game.start();

        for _ in 0..5 {
            assert!(game.advance());
        }
        assert_eq!(game.state().time_ticks, 5);
        assert_eq!(
            game.state().asteroids.len(),
            GameState::asteroid_count_for_level(1)
        );
        // The in-memory session view is intact even though nothing persisted
        assert!(game.session().game_running);
        assert_eq!(game.session().lives, STARTING_LIVES);
    }

    #[test]
    fn failed_write_is_retried_on_the_next_sync() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            failures_left: 1,
        };
        let mut game = Game::new(7, Box::new(store), AudioManager::disabled());

        // First write (the start transition) is refused
        game.start();
        assert!(!game.store().load().unwrap().game_running);

        // The next sync carries the same diff and lands it
        game.advance();
        assert!(game.store().load().unwrap().game_running);
    }

    #[test]
    fn game_over_halts_the_loop_and_persists_flags() {
        let mut game = quiet_game(MemoryStore::new());
        game.start();
        game.take_changed();

        let state = game.state_mut();
        state.lives = 1;
        let ship_pos = state.ship.pos;
        state.asteroids = vec![Asteroid {
            pos: ship_pos + Vec2::new(5.0, 0.0),
            vel: Vec2::ZERO,
            radius: 30.0,
        }];

        assert!(!game.advance());
        let session = game.session();
        assert!(session.game_over);
        assert!(!session.game_running);
        assert_eq!(session.lives, 0);
        assert!(game.take_changed());

        let persisted = game.store().load().unwrap();
        assert!(persisted.game_over);
        assert!(!persisted.game_running);

        // Loop refuses to reschedule until reset
        let ticks = game.state().time_ticks;
        assert!(!game.advance());
        assert_eq!(game.state().time_ticks, ticks);
        assert!(!game.start());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut game = quiet_game(MemoryStore::new());
        game.start();
        game.state_mut().score = 700;
        game.state_mut().lives = 1;
        game.advance();

        game.reset();
        let first = game.session();
        game.reset();
        let second = game.session();

        assert_eq!(first, second);
        assert_eq!(first.score, 0);
        assert_eq!(first.lives, STARTING_LIVES);
        assert_eq!(first.level, 1);
        assert!(!first.game_over);
        assert!(!first.game_running);
    }

    #[test]
    fn reset_leaves_game_over() {
        let mut game = quiet_game(MemoryStore::new());
        game.start();
        let state = game.state_mut();
        state.lives = 1;
        let ship_pos = state.ship.pos;
        state.asteroids = vec![Asteroid {
            pos: ship_pos,
            vel: Vec2::ZERO,
            radius: 30.0,
        }];
        game.advance();
        assert!(game.session().game_over);

        game.reset();
        assert!(!game.session().game_over);
        assert!(game.start());
    }
}
