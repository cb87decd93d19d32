//! Fakes and a time-stepping harness for the end-to-end tests.

#![allow(dead_code)]

use deskclock::calendar::{weekday_of, DateTime};
use deskclock::config::MAIN_LOOP_INTERVAL_MS;
use deskclock::devices::{Climate, ClimateSensor, Eeprom, TimeKeeper};
use deskclock::input::{EventKind, EventQueue, InputEvent};
use deskclock::settings::{EepromSettingsStore, Settings, SettingsStore};
use deskclock::ui::{FrameSink, PageId};
use deskclock::{App, Error};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Frame sink that only keeps statistics.
pub struct Screen {
    pub frames: u32,
    pub lit: u32,
    pub powered: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            frames: 0,
            lit: 0,
            powered: true,
        }
    }
}

impl OriginDimensions for Screen {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for Screen {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        let area = self.bounding_box();
        self.lit += pixels
            .into_iter()
            .filter(|Pixel(p, c)| area.contains(*p) && c.is_on())
            .count() as u32;
        Ok(())
    }
}

impl FrameSink for Screen {
    fn begin_frame(&mut self) {
        self.lit = 0;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn set_powered(&mut self, on: bool) {
        self.powered = on;
    }
}

pub struct Memory {
    pub bytes: [u8; 256],
}

impl Memory {
    /// Erased part: every byte reads 0xFF.
    pub fn blank() -> Self {
        Self { bytes: [0xFF; 256] }
    }

    pub fn holding(settings: Settings) -> Self {
        let mut store = EepromSettingsStore::new(Self::blank());
        store.save(&settings).unwrap();
        let mut mem = Self::blank();
        store.eeprom_mut().read(0, &mut mem.bytes).unwrap();
        mem
    }
}

impl Eeprom for Memory {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Error> {
        let start = address as usize;
        let src = self.bytes.get(start..start + buf.len()).ok_or(Error::BufferOverflow)?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Error> {
        let start = address as usize;
        let dst = self
            .bytes
            .get_mut(start..start + data.len())
            .ok_or(Error::BufferOverflow)?;
        dst.copy_from_slice(data);
        Ok(())
    }
}

pub struct Rtc {
    pub now: DateTime,
    pub sets: u32,
}

impl Rtc {
    pub fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            now: DateTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
                weekday: weekday_of(year, month, day),
            },
            sets: 0,
        }
    }
}

impl TimeKeeper for Rtc {
    fn get_time(&mut self) -> Result<DateTime, Error> {
        Ok(self.now)
    }

    fn set_time(&mut self, time: &DateTime) -> Result<(), Error> {
        self.now = *time;
        self.sets += 1;
        Ok(())
    }
}

pub struct Thermo;

impl ClimateSensor for Thermo {
    fn read(&mut self) -> Result<Climate, Error> {
        Ok(Climate {
            temperature_c: 22.0,
            humidity_pct: 45.0,
        })
    }
}

pub type ClockApp = App<Rtc, EepromSettingsStore<Memory>, Thermo>;

/// An `App` plus the queue and screen it is polled with, advanced in
/// main-loop sized steps.
pub struct Rig {
    pub app: ClockApp,
    pub queue: EventQueue,
    pub screen: Screen,
    pub now_ms: u32,
}

impl Rig {
    pub fn new(rtc: Rtc, memory: Memory) -> Self {
        Self {
            app: App::new(rtc, EepromSettingsStore::new(memory), Thermo, 0),
            queue: EventQueue::new(),
            screen: Screen::new(),
            now_ms: 0,
        }
    }

    pub fn run(&mut self, ms: u32) {
        let step = MAIN_LOOP_INTERVAL_MS as u32;
        let end = self.now_ms + ms;
        while self.now_ms < end {
            self.now_ms += step;
            self.app.tick(self.now_ms, &self.queue, &mut self.screen);
        }
    }

    /// Queue one event and give the UI time to finish reacting to it.
    pub fn input(&mut self, kind: EventKind) {
        assert!(self.queue.push(InputEvent::new(kind, self.now_ms)));
        self.run(400);
    }

    pub fn current(&self) -> PageId {
        self.app.engine().current()
    }

    pub fn rtc(&self) -> &Rtc {
        &self.app.engine().pages().services().clock
    }
}
