//! Fire-and-forget sound interface
//!
//! The core only requests sounds; playback lives behind the `SoundSink`
//! trait so a host can wire in whatever backend it has. A sink failure is
//! the sink's problem - nothing here may stall or crash a tick.

/// The full sound bank. The simulation loop only triggers the fire, thrust,
/// and bang sounds; the rest are host-side (heartbeat, bonuses, saucers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    Fire,
    Thrust,
    BangLarge,
    BangMedium,
    BangSmall,
    Beat1,
    Beat2,
    ExtraShip,
    SaucerBig,
    SaucerSmall,
}

impl SoundId {
    /// Stable asset name, usable as a file stem or lookup key
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::Fire => "fire",
            SoundId::Thrust => "thrust",
            SoundId::BangLarge => "bangLarge",
            SoundId::BangMedium => "bangMedium",
            SoundId::BangSmall => "bangSmall",
            SoundId::Beat1 => "beat1",
            SoundId::Beat2 => "beat2",
            SoundId::ExtraShip => "extraShip",
            SoundId::SaucerBig => "saucerBig",
            SoundId::SaucerSmall => "saucerSmall",
        }
    }
}

/// Playback backend supplied by the host. Implementations must swallow
/// their own errors; `play` is fire-and-forget and is never awaited.
pub trait SoundSink {
    fn play(&self, sound: SoundId);
}

/// Routes sound requests to an optional backend. When initialization fails
/// the host constructs this disabled and every request becomes a no-op.
pub struct AudioManager {
    sink: Option<Box<dyn SoundSink>>,
}

impl AudioManager {
    pub fn new(sink: Box<dyn SoundSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Audio unavailable; requests are dropped silently
    pub fn disabled() -> Self {
        log::warn!("audio backend unavailable - sounds disabled");
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn play(&self, sound: SoundId) {
        if let Some(sink) = &self.sink {
            sink.play(sound);
        }
    }
}

/// Sink that logs each request, for headless runs and demos
pub struct DebugSink;

impl SoundSink for DebugSink {
    fn play(&self, sound: SoundId) {
        log::debug!("play sound: {}", sound.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingSink(Rc<RefCell<Vec<SoundId>>>);

    impl SoundSink for RecordingSink {
        fn play(&self, sound: SoundId) {
            self.0.borrow_mut().push(sound);
        }
    }

    #[test]
    fn manager_forwards_to_sink() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let audio = AudioManager::new(Box::new(RecordingSink(played.clone())));
        audio.play(SoundId::Fire);
        audio.play(SoundId::BangSmall);
        assert_eq!(*played.borrow(), vec![SoundId::Fire, SoundId::BangSmall]);
    }

    #[test]
    fn disabled_manager_is_a_noop() {
        let audio = AudioManager::disabled();
        assert!(!audio.is_enabled());
        audio.play(SoundId::Thrust);
    }

    #[test]
    fn asset_names_match_the_sound_bank() {
        assert_eq!(SoundId::BangLarge.as_str(), "bangLarge");
        assert_eq!(SoundId::SaucerSmall.as_str(), "saucerSmall");
    }
}
