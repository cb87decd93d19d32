//! Screen power management.
//!
//! The OLED turns off after the configured idle time and the UI returns
//! to the home page, so the clock face is what wakes up. The button press
//! that wakes the screen is swallowed rather than acted on.

use crate::settings::AutoOff;

/// Decide whether the screen should still be on after `idle_ms` without
/// input. `timeout_ms == None` disables auto-off.
pub fn screen_should_be_on(idle_ms: u32, timeout_ms: Option<u32>) -> bool {
    match timeout_ms {
        Some(timeout) => idle_ms <= timeout,
        None => true,
    }
}

/// What the caller has to do after [`ScreenPower::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerAction {
    /// Nothing changed.
    None,
    /// Screen was off and input arrived: power the panel and drop the
    /// pending input.
    Wake,
    /// Idle timeout elapsed: power the panel down and go home.
    Sleep,
}

/// Tracks activity and the screen on/off state.
pub struct ScreenPower {
    screen_on: bool,
    last_activity_ms: u32,
}

impl ScreenPower {
    pub fn new(now_ms: u32) -> Self {
        Self {
            screen_on: true,
            last_activity_ms: now_ms,
        }
    }

    pub fn is_screen_on(&self) -> bool {
        self.screen_on
    }

    pub fn last_activity_ms(&self) -> u32 {
        self.last_activity_ms
    }

    /// Record activity (any pending input).
    pub fn activity(&mut self, now_ms: u32) -> PowerAction {
        self.last_activity_ms = now_ms;
        if self.screen_on {
            return PowerAction::None;
        }
        info!("Power: screen on");
        self.screen_on = true;
        PowerAction::Wake
    }

    /// Periodic check, once per main-loop tick.
    pub fn update(&mut self, now_ms: u32, pending_events: usize, auto_off: AutoOff) -> PowerAction {
        if pending_events > 0 {
            return self.activity(now_ms);
        }

        let idle_ms = now_ms.wrapping_sub(self.last_activity_ms);
        if self.screen_on && !screen_should_be_on(idle_ms, auto_off.timeout_ms()) {
            info!("Power: idle {} ms, screen off", idle_ms);
            self.screen_on = false;
            return PowerAction::Sleep;
        }
        PowerAction::None
    }
}
