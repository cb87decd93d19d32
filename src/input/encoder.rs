//! Rotary encoder step tracking.
//!
//! The quadrature decoder exposes a free-running 16-bit counter. We keep
//! the last snapshot and turn each new snapshot into a signed delta, so
//! steps are never lost across the counter's wraparound.

use crate::devices::QuadratureCounter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadratureTracker {
    last: u16,
}

impl QuadratureTracker {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Start tracking from an arbitrary counter value.
    pub const fn starting_at(count: u16) -> Self {
        Self { last: count }
    }

    pub fn last(&self) -> u16 {
        self.last
    }

    /// Feed a counter snapshot. Returns the signed step count since the
    /// previous snapshot, or `None` when the encoder has not moved.
    pub fn update(&mut self, current: u16) -> Option<i16> {
        let delta = current.wrapping_sub(self.last) as i16;
        if delta == 0 {
            return None;
        }
        self.last = current;
        Some(delta)
    }

    /// Zero the hardware counter and the tracked snapshot together.
    pub fn reset<C: QuadratureCounter + ?Sized>(&mut self, counter: &mut C) {
        counter.set_count(0);
        self.last = 0;
    }
}
