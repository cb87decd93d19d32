use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::{Context, Page, PageId};
use crate::calendar::DateTime;
use crate::config::PICKER_REFRESH_MS;
use crate::input::InputEvent;
use crate::ui::nav::Nav;
use crate::ui::picker::{PickerLayout, PickerSignal, SlotPicker, DATE_LAYOUT, TIME_LAYOUT};

/// Date or time editor built on the slot picker.
pub struct EditorPage {
    name: &'static str,
    picker: SlotPicker,
}

impl EditorPage {
    pub fn new(name: &'static str, layout: PickerLayout) -> Self {
        Self {
            name,
            picker: SlotPicker::new(layout),
        }
    }

    pub fn date() -> Self {
        Self::new("Date", DATE_LAYOUT)
    }

    pub fn time() -> Self {
        Self::new("Time", TIME_LAYOUT)
    }

    pub fn picker(&self) -> &SlotPicker {
        &self.picker
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.picker.draw(target, offset)
    }
}

fn exit_on(signal: PickerSignal) -> Nav<PageId> {
    match signal {
        PickerSignal::Exit => Nav::Back,
        PickerSignal::None => Nav::Stay,
    }
}

impl Page for EditorPage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn refresh_interval_ms(&self) -> u32 {
        PICKER_REFRESH_MS
    }

    fn on_enter(&mut self, ctx: &mut Context<'_>) {
        let now = ctx.clock.get_time().unwrap_or_else(|e| {
            warn!("Editor: RTC read failed ({}), starting from default", e.as_str());
            DateTime::default()
        });
        self.picker.reset(now, ctx.now_ms);
    }

    fn on_loop(&mut self, ctx: &mut Context<'_>) -> Nav<PageId> {
        exit_on(self.picker.tick(ctx.now_ms))
    }

    fn on_action(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Nav<PageId> {
        exit_on(self.picker.handle(event, ctx.now_ms, &mut *ctx.clock))
    }
}
