//! Held-control tracking with an edge-triggered fire latch
//!
//! Raw key edges arrive asynchronously from the host; the orchestration layer
//! buffers them and applies the buffer at tick start so a tick never observes
//! a half-applied input. Rotate and thrust are level-triggered (active every
//! tick while held); fire latches once per press-release cycle and the latch
//! is cleared when the tick consumes it.

/// Logical controls the host can bind keys to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

/// A key-down (`pressed`) or key-up edge for one control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub control: Control,
    pub pressed: bool,
}

impl InputEvent {
    pub fn down(control: Control) -> Self {
        Self {
            control,
            pressed: true,
        }
    }

    pub fn up(control: Control) -> Self {
        Self {
            control,
            pressed: false,
        }
    }
}

/// Current held state of all controls; everything starts released
#[derive(Debug, Clone, Default)]
pub struct InputState {
    rotate_left: bool,
    rotate_right: bool,
    thrust: bool,
    fire_held: bool,
    fire_latched: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event.control {
            Control::RotateLeft => self.rotate_left = event.pressed,
            Control::RotateRight => self.rotate_right = event.pressed,
            Control::Thrust => self.thrust = event.pressed,
            Control::Fire => {
                if event.pressed {
                    // Repeated key-down while held does not re-latch
                    if !self.fire_held {
                        self.fire_latched = true;
                    }
                    self.fire_held = true;
                } else {
                    self.fire_held = false;
                    self.fire_latched = false;
                }
            }
        }
    }

    pub fn rotate_left(&self) -> bool {
        self.rotate_left
    }

    pub fn rotate_right(&self) -> bool {
        self.rotate_right
    }

    pub fn thrust(&self) -> bool {
        self.thrust
    }

    /// Consume the fire latch. Returns true at most once per press-release
    /// cycle regardless of how many ticks elapse while the key stays held.
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire_latched)
    }

    /// Drop all held state (level transitions discard stale input)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
