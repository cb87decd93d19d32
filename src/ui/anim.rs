//! Time-based animation helpers.
//!
//! Nothing here sleeps: every animation is a start timestamp plus a
//! duration, sampled with the current tick.

/// Linear progress of an animation, clamped to `0.0..=1.0`.
pub fn progress(start_ms: u32, duration_ms: u32, now_ms: u32) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    let elapsed = now_ms.wrapping_sub(start_ms);
    if elapsed >= duration_ms {
        1.0
    } else {
        elapsed as f32 / duration_ms as f32
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Quadratic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Quadratic ease-out.
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Round to the nearest pixel without `std` float intrinsics.
pub fn round_px(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

/// A scalar moving from `start` to `target` over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub current: f32,
    pub start: f32,
    pub target: f32,
    pub start_ms: u32,
    pub duration_ms: u32,
}

impl Tween {
    /// A tween already at rest on `value`.
    pub const fn settled(value: f32) -> Self {
        Self {
            current: value,
            start: value,
            target: value,
            start_ms: 0,
            duration_ms: 0,
        }
    }

    /// Start moving from wherever we are now towards `target`.
    pub fn retarget(&mut self, target: f32, duration_ms: u32, now_ms: u32) {
        self.start = self.current;
        self.target = target;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms;
    }

    /// Jump to `value` immediately.
    pub fn snap(&mut self, value: f32) {
        *self = Self::settled(value);
    }

    /// Advance to `now_ms`. Returns `true` once the target is reached.
    pub fn advance(&mut self, now_ms: u32) -> bool {
        let p = progress(self.start_ms, self.duration_ms, now_ms);
        if p >= 1.0 {
            self.current = self.target;
            true
        } else {
            self.current = lerp(self.start, self.target, p);
            false
        }
    }
}
