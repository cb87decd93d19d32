//! Scan-timer body: samples every input once and feeds the queue.

use super::{Button, Debouncer, EventKind, EventQueue, InputEvent, KeyTransition, QuadratureTracker};
use crate::config::MIN_KEY_SAMPLE_GAP_MS;
use crate::devices::QuadratureCounter;

/// Raw levels read from the hardware in one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawInputs {
    /// Logical "pressed" level per button, in [`Button::ALL`] order.
    pub buttons: [bool; 3],
    /// Current value of the quadrature counter.
    pub encoder_count: u16,
}

impl RawInputs {
    pub fn button(&self, button: Button) -> bool {
        self.buttons[button as usize]
    }
}

/// Debouncers for the three keys plus the encoder tracker.
#[derive(Debug, Default)]
pub struct InputScanner {
    keys: [Debouncer; 3],
    encoder: QuadratureTracker,
    last_key_sample_ms: Option<u32>,
}

impl InputScanner {
    pub const fn new() -> Self {
        Self {
            keys: [Debouncer::new(), Debouncer::new(), Debouncer::new()],
            encoder: QuadratureTracker::new(),
            last_key_sample_ms: None,
        }
    }

    /// Zero the hardware counter and clear all debounce state.
    pub fn reset<C: QuadratureCounter + ?Sized>(&mut self, counter: &mut C) {
        for key in &mut self.keys {
            key.reset();
        }
        self.last_key_sample_ms = None;
        self.encoder.reset(counter);
    }

    /// Run one scan. Returns how many events the queue accepted.
    ///
    /// Key levels sampled less than `MIN_KEY_SAMPLE_GAP_MS` after the
    /// previous key sample are not fed to the debouncers, so a burst of
    /// late scans cannot count as consecutive debounce samples.
    pub fn scan<const N: usize>(&mut self, raw: RawInputs, now_ms: u32, queue: &EventQueue<N>) -> usize {
        let mut pushed = 0;

        if self.key_sample_due(now_ms) {
            self.last_key_sample_ms = Some(now_ms);
            for button in Button::ALL {
                let key = &mut self.keys[button as usize];
                if key.update(raw.button(button)) == KeyTransition::Pressed {
                    pushed += Self::emit(queue, button.press_event(), now_ms);
                }
            }
        }

        if let Some(delta) = self.encoder.update(raw.encoder_count) {
            pushed += Self::emit(queue, EventKind::EncoderRotated(delta), now_ms);
        }

        pushed
    }

    fn key_sample_due(&self, now_ms: u32) -> bool {
        match self.last_key_sample_ms {
            None => true,
            Some(at) => now_ms.wrapping_sub(at) >= MIN_KEY_SAMPLE_GAP_MS,
        }
    }

    fn emit<const N: usize>(queue: &EventQueue<N>, kind: EventKind, now_ms: u32) -> usize {
        if queue.push(InputEvent::new(kind, now_ms)) {
            1
        } else {
            debug!("Input: queue full, event dropped");
            0
        }
    }
}
