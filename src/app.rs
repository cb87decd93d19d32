//! Top-level application loop: screen power policy plus page navigation.

use crate::devices::{ClimateSensor, TimeKeeper};
use crate::input::EventQueue;
use crate::power::{PowerAction, ScreenPower};
use crate::settings::{self, SettingsStore};
use crate::ui::{ClockPages, FrameSink, NavigationEngine, Services};

pub type ClockEngine<T, S, C> = NavigationEngine<ClockPages<T, S, C>>;

pub struct App<T, S, C>
where
    T: TimeKeeper,
    S: SettingsStore,
    C: ClimateSensor,
{
    engine: ClockEngine<T, S, C>,
    power: ScreenPower,
}

impl<T, S, C> App<T, S, C>
where
    T: TimeKeeper,
    S: SettingsStore,
    C: ClimateSensor,
{
    /// Load settings, build the pages and enter the home page.
    pub fn new(clock: T, mut store: S, sensor: C, now_ms: u32) -> Self {
        let (settings, load_failed) = settings::load_or_default(&mut store);
        let pages = ClockPages::new(Services {
            clock,
            store,
            sensor,
            settings,
            load_failed,
        });
        let mut engine = NavigationEngine::new(pages);
        engine.start(now_ms);
        Self {
            engine,
            power: ScreenPower::new(now_ms),
        }
    }

    pub fn engine(&self) -> &ClockEngine<T, S, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ClockEngine<T, S, C> {
        &mut self.engine
    }

    pub fn is_screen_on(&self) -> bool {
        self.power.is_screen_on()
    }

    /// One main-loop iteration.
    pub fn tick<D: FrameSink, const N: usize>(&mut self, now_ms: u32, queue: &EventQueue<N>, display: &mut D) {
        let auto_off = self.engine.pages().settings().auto_off;
        match self.power.update(now_ms, queue.len(), auto_off) {
            PowerAction::Wake => {
                queue.clear();
                display.set_powered(true);
            }
            PowerAction::Sleep => {
                display.set_powered(false);
                self.engine.go_home(now_ms);
            }
            PowerAction::None => {}
        }

        if self.power.is_screen_on() {
            self.engine.poll(now_ms, queue, display);
        }
    }
}
