//! Persisted session fields and the storage interface
//!
//! Score, lives, level, and the running/over flags outlive the entity sets;
//! an external key-value store holds them. Writes are partial: a patch
//! carries only the fields that changed and merging it must not clobber
//! anything else the store holds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::consts::STARTING_LIVES;
use crate::sim::{GamePhase, GameState};

fn default_lives() -> u8 {
    STARTING_LIVES
}

fn default_level() -> u32 {
    1
}

/// The externally persisted view of a session. `game_over` and
/// `game_running` are never both true: exactly one of them (or neither,
/// while idle) governs whether the loop advances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub score: u64,
    #[serde(default = "default_lives")]
    pub lives: u8,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub game_running: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            game_over: false,
            game_running: false,
        }
    }
}

impl SessionState {
    /// Snapshot the persisted fields out of a live game
    pub fn from_game(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            level: state.level,
            game_over: state.phase == GamePhase::GameOver,
            game_running: state.phase == GamePhase::Running,
        }
    }

    pub fn is_consistent(&self) -> bool {
        !(self.game_over && self.game_running)
    }
}

/// A partial update: only the set fields are written to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lives: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_running: Option<bool>,
}

impl SessionPatch {
    /// Fields of `current` that differ from `last`
    pub fn diff(last: &SessionState, current: &SessionState) -> Self {
        Self {
            score: (last.score != current.score).then_some(current.score),
            lives: (last.lives != current.lives).then_some(current.lives),
            level: (last.level != current.level).then_some(current.level),
            game_over: (last.game_over != current.game_over).then_some(current.game_over),
            game_running: (last.game_running != current.game_running)
                .then_some(current.game_running),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Storage failure. Reads that fail recover to default session values at
/// the call site; writes that fail are logged and the tick carries on.
#[derive(Debug)]
pub enum StoreError {
    /// Persisted state exists but cannot be decoded
    Corrupt(String),
    /// The backend rejected the operation
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Corrupt(detail) => write!(f, "corrupt session state: {detail}"),
            StoreError::Backend(detail) => write!(f, "session store backend: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// External key-value store holding the session fields
pub trait SessionStore {
    /// Read the full session. Missing fields take their defaults; a store
    /// that holds nothing yet returns `SessionState::default()`.
    fn load(&self) -> Result<SessionState, StoreError>;

    /// Merge the set fields of the patch into the persisted state without
    /// touching unrelated fields.
    fn merge(&mut self, patch: &SessionPatch) -> Result<(), StoreError>;
}

/// In-memory JSON-object store. Keeps the whole session as one object and
/// merges patches field-by-field, so hosts sharing the object for their own
/// fields keep them across merges.
#[derive(Debug, Default)]
pub struct MemoryStore {
    fields: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an arbitrary JSON object (tests, host adapters)
    pub fn with_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw field access, get(field) -> value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<SessionState, StoreError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn merge(&mut self, patch: &SessionPatch) -> Result<(), StoreError> {
        let value = serde_json::to_value(patch).map_err(|e| StoreError::Backend(e.to_string()))?;
        let Value::Object(updates) = value else {
            return Err(StoreError::Backend("patch must serialize to an object".into()));
        };
        self.fields.extend(updates);
        Ok(())
    }
}
