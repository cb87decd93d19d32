//! The clock's screens and their wiring into the navigation engine.
//!
//! Every page is a plain value owned by [`ClockPages`] for the whole
//! program lifetime. Pages reach the RTC, sensor and settings store
//! through a [`Context`] built for each call.

mod editor;
mod home;
mod info;
mod menu;
mod options;

pub use editor::EditorPage;
pub use home::HomePage;
pub use info::InfoPage;
pub use menu::MenuPage;
pub use options::{OptionPage, SettingKind};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::nav::{Nav, PageSet};
use crate::devices::{ClimateSensor, TimeKeeper};
use crate::input::InputEvent;
use crate::settings::{Settings, SettingsStore};

/// Every screen of the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageId {
    Home,
    MainMenu,
    DisplayMenu,
    TimeMenu,
    Language,
    AutoOff,
    Dst,
    Date,
    Time,
    Info,
}

impl PageId {
    pub const COUNT: usize = 10;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Collaborators a page may use while handling one call.
pub struct Context<'a> {
    pub now_ms: u32,
    pub clock: &'a mut dyn TimeKeeper,
    pub sensor: &'a mut dyn ClimateSensor,
    pub store: &'a mut dyn SettingsStore,
    pub settings: &'a mut Settings,
    /// Set at boot when the stored settings could not be read; the home
    /// page reports it once and clears it.
    pub load_failed: &'a mut bool,
}

/// Page lifecycle. Drawing is an inherent `draw` on each page type.
pub trait Page {
    fn name(&self) -> &'static str;

    fn refresh_interval_ms(&self) -> u32;

    fn on_enter(&mut self, ctx: &mut Context<'_>);

    fn on_exit(&mut self, _ctx: &mut Context<'_>) {}

    fn on_loop(&mut self, _ctx: &mut Context<'_>) -> Nav<PageId> {
        Nav::Stay
    }

    fn on_action(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Nav<PageId>;
}

/// Drivers and persistent state shared by all pages.
pub struct Services<T, S, C> {
    pub clock: T,
    pub store: S,
    pub sensor: C,
    pub settings: Settings,
    pub load_failed: bool,
}

impl<T: TimeKeeper, S: SettingsStore, C: ClimateSensor> Services<T, S, C> {
    fn context(&mut self, now_ms: u32) -> Context<'_> {
        Context {
            now_ms,
            clock: &mut self.clock,
            sensor: &mut self.sensor,
            store: &mut self.store,
            settings: &mut self.settings,
            load_failed: &mut self.load_failed,
        }
    }
}

pub struct ClockPages<T, S, C> {
    services: Services<T, S, C>,
    home: HomePage,
    main_menu: MenuPage,
    display_menu: MenuPage,
    time_menu: MenuPage,
    language: OptionPage,
    auto_off: OptionPage,
    dst: OptionPage,
    date: EditorPage,
    time: EditorPage,
    info: InfoPage,
    last_refresh: [Option<u32>; PageId::COUNT],
}

impl<T: TimeKeeper, S: SettingsStore, C: ClimateSensor> ClockPages<T, S, C> {
    pub fn new(services: Services<T, S, C>) -> Self {
        Self {
            services,
            home: HomePage::new(),
            main_menu: MenuPage::main(),
            display_menu: MenuPage::display(),
            time_menu: MenuPage::time(),
            language: OptionPage::new(SettingKind::Language),
            auto_off: OptionPage::new(SettingKind::AutoOff),
            dst: OptionPage::new(SettingKind::Dst),
            date: EditorPage::date(),
            time: EditorPage::time(),
            info: InfoPage::new(),
            last_refresh: [None; PageId::COUNT],
        }
    }

    pub fn services(&self) -> &Services<T, S, C> {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services<T, S, C> {
        &mut self.services
    }

    pub fn settings(&self) -> &Settings {
        &self.services.settings
    }

    pub fn home_page(&self) -> &HomePage {
        &self.home
    }

    pub fn option_page(&self, kind: SettingKind) -> &OptionPage {
        match kind {
            SettingKind::Language => &self.language,
            SettingKind::AutoOff => &self.auto_off,
            SettingKind::Dst => &self.dst,
        }
    }

    pub fn editor(&self, id: PageId) -> Option<&EditorPage> {
        match id {
            PageId::Date => Some(&self.date),
            PageId::Time => Some(&self.time),
            _ => None,
        }
    }

    fn page(&self, id: PageId) -> &dyn Page {
        match id {
            PageId::Home => &self.home,
            PageId::MainMenu => &self.main_menu,
            PageId::DisplayMenu => &self.display_menu,
            PageId::TimeMenu => &self.time_menu,
            PageId::Language => &self.language,
            PageId::AutoOff => &self.auto_off,
            PageId::Dst => &self.dst,
            PageId::Date => &self.date,
            PageId::Time => &self.time,
            PageId::Info => &self.info,
        }
    }

    /// Borrow one page together with a context over the shared services.
    fn split(&mut self, id: PageId, now_ms: u32) -> (&mut dyn Page, Context<'_>) {
        let ClockPages {
            services,
            home,
            main_menu,
            display_menu,
            time_menu,
            language,
            auto_off,
            dst,
            date,
            time,
            info,
            ..
        } = self;
        let page: &mut dyn Page = match id {
            PageId::Home => home,
            PageId::MainMenu => main_menu,
            PageId::DisplayMenu => display_menu,
            PageId::TimeMenu => time_menu,
            PageId::Language => language,
            PageId::AutoOff => auto_off,
            PageId::Dst => dst,
            PageId::Date => date,
            PageId::Time => time,
            PageId::Info => info,
        };
        (page, services.context(now_ms))
    }
}

impl<T: TimeKeeper, S: SettingsStore, C: ClimateSensor> PageSet for ClockPages<T, S, C> {
    type Id = PageId;

    fn home(&self) -> PageId {
        PageId::Home
    }

    fn name(&self, id: PageId) -> &'static str {
        self.page(id).name()
    }

    fn refresh_interval_ms(&self, id: PageId) -> u32 {
        self.page(id).refresh_interval_ms()
    }

    fn last_refresh_ms(&self, id: PageId) -> Option<u32> {
        self.last_refresh[id.index()]
    }

    fn set_last_refresh_ms(&mut self, id: PageId, at: Option<u32>) {
        self.last_refresh[id.index()] = at;
    }

    fn enter(&mut self, id: PageId, now_ms: u32) {
        let (page, mut ctx) = self.split(id, now_ms);
        page.on_enter(&mut ctx);
    }

    fn exit(&mut self, id: PageId, now_ms: u32) {
        let (page, mut ctx) = self.split(id, now_ms);
        page.on_exit(&mut ctx);
    }

    fn tick(&mut self, id: PageId, now_ms: u32) -> Nav<PageId> {
        let (page, mut ctx) = self.split(id, now_ms);
        page.on_loop(&mut ctx)
    }

    fn action(&mut self, id: PageId, event: &InputEvent, now_ms: u32) -> Nav<PageId> {
        let (page, mut ctx) = self.split(id, now_ms);
        page.on_action(event, &mut ctx)
    }

    fn draw<D>(&self, id: PageId, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match id {
            PageId::Home => self.home.draw(target, offset),
            PageId::MainMenu => self.main_menu.draw(target, offset),
            PageId::DisplayMenu => self.display_menu.draw(target, offset),
            PageId::TimeMenu => self.time_menu.draw(target, offset),
            PageId::Language => self.language.draw(target, offset),
            PageId::AutoOff => self.auto_off.draw(target, offset),
            PageId::Dst => self.dst.draw(target, offset),
            PageId::Date => self.date.draw(target, offset),
            PageId::Time => self.time.draw(target, offset),
            PageId::Info => self.info.draw(target, offset),
        }
    }
}
