use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::{Context, Page, PageId};
use crate::config::{LIST_HOP_MS, LIST_SCROLL_MS, OPTION_REFRESH_MS};
use crate::input::InputEvent;
use crate::settings::{AutoOff, Language, Settings};
use crate::ui::list::{ListInput, ListSelector, ListStyle};
use crate::ui::message::SAVE_FAILED;
use crate::ui::nav::Nav;

pub const SETTINGS_SAVED: &str = "Settings Saved!";

const DST_LABELS: [&str; 2] = ["Off", "On"];

/// Which persisted setting an option page edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKind {
    Language,
    AutoOff,
    Dst,
}

impl SettingKind {
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            SettingKind::Language => &Language::LABELS,
            SettingKind::AutoOff => &AutoOff::LABELS,
            SettingKind::Dst => &DST_LABELS,
        }
    }

    pub fn current(self, settings: &Settings) -> usize {
        match self {
            SettingKind::Language => settings.language.index(),
            SettingKind::AutoOff => settings.auto_off.index(),
            SettingKind::Dst => usize::from(settings.dst_enabled),
        }
    }

    pub fn apply(self, settings: &mut Settings, index: usize) {
        match self {
            SettingKind::Language => {
                if let Some(language) = Language::from_index(index) {
                    settings.language = language;
                }
            }
            SettingKind::AutoOff => {
                if let Some(auto_off) = AutoOff::from_index(index) {
                    settings.auto_off = auto_off;
                }
            }
            SettingKind::Dst => settings.dst_enabled = index == 1,
        }
    }

    fn style(self) -> ListStyle {
        match self {
            // Five rows, four visible: needs to scroll.
            SettingKind::AutoOff => ListStyle::new(0, 4, LIST_HOP_MS, LIST_SCROLL_MS),
            SettingKind::Language | SettingKind::Dst => ListStyle::new(16, 4, LIST_HOP_MS, LIST_SCROLL_MS),
        }
    }
}

/// A list that commits the chosen row to the settings store.
pub struct OptionPage {
    kind: SettingKind,
    list: ListSelector,
}

impl OptionPage {
    pub fn new(kind: SettingKind) -> Self {
        Self {
            kind,
            list: ListSelector::new(kind.labels(), kind.style()),
        }
    }

    pub fn list(&self) -> &ListSelector {
        &self.list
    }

    fn commit(&mut self, index: usize, ctx: &mut Context<'_>) {
        let mut updated = *ctx.settings;
        self.kind.apply(&mut updated, index);

        let text = match ctx.store.save(&updated) {
            Ok(()) => {
                *ctx.settings = updated;
                info!("Settings: {} saved", self.kind.labels()[index]);
                SETTINGS_SAVED
            }
            Err(e) => {
                error!("Settings: save failed ({})", e.as_str());
                SAVE_FAILED
            }
        };
        self.list.show_message(text, ctx.now_ms);
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.list.draw(target, offset)
    }
}

impl Page for OptionPage {
    fn name(&self) -> &'static str {
        match self.kind {
            SettingKind::Language => "Language",
            SettingKind::AutoOff => "Auto-Off",
            SettingKind::Dst => "DST",
        }
    }

    fn refresh_interval_ms(&self) -> u32 {
        OPTION_REFRESH_MS
    }

    fn on_enter(&mut self, ctx: &mut Context<'_>) {
        self.list.reset(self.kind.current(ctx.settings));
    }

    fn on_loop(&mut self, ctx: &mut Context<'_>) -> Nav<PageId> {
        if self.list.tick(ctx.now_ms) {
            Nav::Back
        } else {
            Nav::Stay
        }
    }

    fn on_action(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Nav<PageId> {
        match self.list.handle(event, ctx.now_ms) {
            ListInput::Confirmed(index) => {
                self.commit(index, ctx);
                Nav::Stay
            }
            ListInput::Back => Nav::Back,
            ListInput::Moved | ListInput::Ignored => Nav::Stay,
        }
    }
}
