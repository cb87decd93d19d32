//! Input pipeline - buttons and rotary encoder.
//!
//! A periodic scan (timer context) runs three debouncers and the
//! quadrature tracker and pushes timestamped events into the shared
//! [`EventQueue`]; the main loop drains one event per tick.
//!
//! ## Components
//!
//! - **Debouncer**: per-key Idle / Debouncing / Pressed state machine
//! - **QuadratureTracker**: counter snapshots to signed step deltas
//! - **EventQueue**: fixed-capacity FIFO behind a critical section

pub mod debounce;
pub mod encoder;
pub mod queue;
pub mod scan;

pub use debounce::{Debouncer, KeyState, KeyTransition};
pub use encoder::QuadratureTracker;
pub use queue::EventQueue;
pub use scan::{InputScanner, RawInputs};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    None,
    BackPressed,
    ConfirmPressed,
    EncoderPressed,
    /// Signed number of detent steps since the previous scan.
    EncoderRotated(i16),
}

/// One input event, stamped with the scan tick that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub kind: EventKind,
    pub timestamp: u32,
}

impl InputEvent {
    pub const fn new(kind: EventKind, timestamp: u32) -> Self {
        Self { kind, timestamp }
    }

    /// True for any of the three push buttons.
    pub fn is_button(&self) -> bool {
        matches!(
            self.kind,
            EventKind::BackPressed | EventKind::ConfirmPressed | EventKind::EncoderPressed
        )
    }
}

/// Physical push buttons, in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Back,
    Confirm,
    Encoder,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Back, Button::Confirm, Button::Encoder];

    /// Event emitted when this button is pressed.
    pub const fn press_event(self) -> EventKind {
        match self {
            Button::Back => EventKind::BackPressed,
            Button::Confirm => EventKind::ConfirmPressed,
            Button::Encoder => EventKind::EncoderPressed,
        }
    }
}
