use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use super::{Context, Page, PageId};
use crate::config::{APP_AUTHOR, APP_NAME, APP_VERSION, INFO_REFRESH_MS};
use crate::input::InputEvent;
use crate::ui::draw::{centered, text_style};
use crate::ui::nav::Nav;

/// Static about screen. Any button leaves.
#[derive(Default)]
pub struct InfoPage;

impl InfoPage {
    pub const fn new() -> Self {
        Self
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let lines = [APP_NAME, "Version", APP_VERSION, APP_AUTHOR];
        for (i, line) in lines.iter().enumerate() {
            let pos = Point::new(64, 8 + i as i32 * 16) + offset;
            Text::with_text_style(line, pos, text_style(), centered()).draw(target)?;
        }
        Ok(())
    }
}

impl Page for InfoPage {
    fn name(&self) -> &'static str {
        "Info"
    }

    fn refresh_interval_ms(&self) -> u32 {
        INFO_REFRESH_MS
    }

    fn on_enter(&mut self, _ctx: &mut Context<'_>) {}

    fn on_action(&mut self, event: &InputEvent, _ctx: &mut Context<'_>) -> Nav<PageId> {
        if event.is_button() {
            Nav::Back
        } else {
            Nav::Stay
        }
    }
}
