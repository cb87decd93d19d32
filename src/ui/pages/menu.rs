use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::{Context, Page, PageId};
use crate::config::{MENU_HIGHLIGHT_MS, MENU_REFRESH_MS};
use crate::input::InputEvent;
use crate::ui::list::{ListInput, ListSelector, ListStyle};
use crate::ui::nav::Nav;

const MENU_STYLE: ListStyle = ListStyle::new(8, 3, MENU_HIGHLIGHT_MS, MENU_HIGHLIGHT_MS);

/// A list whose rows open other pages.
pub struct MenuPage {
    name: &'static str,
    list: ListSelector,
    targets: &'static [PageId],
}

impl MenuPage {
    pub fn new(name: &'static str, items: &'static [&'static str], targets: &'static [PageId]) -> Self {
        Self {
            name,
            list: ListSelector::new(items, MENU_STYLE),
            targets,
        }
    }

    pub fn main() -> Self {
        Self::new(
            "Main Menu",
            &["Display", "Time Set", "Info"],
            &[PageId::DisplayMenu, PageId::TimeMenu, PageId::Info],
        )
    }

    pub fn display() -> Self {
        Self::new(
            "Display",
            &["Language", "Auto-Off"],
            &[PageId::Language, PageId::AutoOff],
        )
    }

    pub fn time() -> Self {
        Self::new(
            "Time Set",
            &["Date", "Time", "DST"],
            &[PageId::Date, PageId::Time, PageId::Dst],
        )
    }

    pub fn selected(&self) -> usize {
        self.list.selected()
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.list.draw(target, offset)
    }
}

impl Page for MenuPage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn refresh_interval_ms(&self) -> u32 {
        MENU_REFRESH_MS
    }

    fn on_enter(&mut self, _ctx: &mut Context<'_>) {
        self.list.reset(0);
    }

    fn on_loop(&mut self, ctx: &mut Context<'_>) -> Nav<PageId> {
        self.list.tick(ctx.now_ms);
        Nav::Stay
    }

    fn on_action(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Nav<PageId> {
        match self.list.handle(event, ctx.now_ms) {
            ListInput::Confirmed(i) => self.targets.get(i).copied().map_or(Nav::Stay, Nav::Push),
            ListInput::Back => Nav::Back,
            ListInput::Moved | ListInput::Ignored => Nav::Stay,
        }
    }
}
