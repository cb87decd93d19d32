//! Transient message overlay ("Settings Saved!", "Save Failed!").

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::draw::draw_toast;

pub const SAVE_FAILED: &str = "Save Failed!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: &'static str,
    pub shown_at_ms: u32,
    pub duration_ms: u32,
}

impl Message {
    pub const fn new(text: &'static str, shown_at_ms: u32, duration_ms: u32) -> Self {
        Self {
            text,
            shown_at_ms,
            duration_ms,
        }
    }

    pub fn is_expired(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.shown_at_ms) >= self.duration_ms
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        draw_toast(target, self.text, offset)
    }
}
