//! Per-key debounce state machine.
//!
//! `Idle → Debouncing → Pressed → Idle`. A press is reported once the
//! key has read asserted for [`DEBOUNCE_SCANS`] consecutive scans; a
//! release during debouncing aborts silently. Holding a key never
//! repeats.

use crate::config::DEBOUNCE_SCANS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    Idle,
    Debouncing,
    Pressed,
}

/// Result of feeding one raw sample into a [`Debouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyTransition {
    /// Nothing changed (idle and released, or still held).
    Unchanged,
    /// First asserted sample seen, or still counting.
    DebounceStarted,
    /// Press accepted. Emitted exactly once per physical press.
    Pressed,
    /// Signal dropped before the threshold; treated as bounce.
    Rejected,
    /// Key released after a press.
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    state: KeyState,
    counter: u8,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            state: KeyState::Idle,
            counter: 0,
        }
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance by one scan. `asserted` is the logical pressed level
    /// (already inverted for active-low wiring).
    pub fn update(&mut self, asserted: bool) -> KeyTransition {
        match (self.state, asserted) {
            (KeyState::Idle, true) => {
                self.state = KeyState::Debouncing;
                self.counter = 1;
                if self.counter >= DEBOUNCE_SCANS {
                    self.state = KeyState::Pressed;
                    return KeyTransition::Pressed;
                }
                KeyTransition::DebounceStarted
            }
            (KeyState::Idle, false) => KeyTransition::Unchanged,
            (KeyState::Debouncing, true) => {
                self.counter = self.counter.saturating_add(1);
                if self.counter >= DEBOUNCE_SCANS {
                    self.state = KeyState::Pressed;
                    KeyTransition::Pressed
                } else {
                    KeyTransition::DebounceStarted
                }
            }
            (KeyState::Debouncing, false) => {
                self.reset();
                KeyTransition::Rejected
            }
            (KeyState::Pressed, true) => KeyTransition::Unchanged,
            (KeyState::Pressed, false) => {
                self.reset();
                KeyTransition::Released
            }
        }
    }
}
