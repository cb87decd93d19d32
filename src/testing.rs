//! In-memory fakes shared by the unit tests.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::calendar::{weekday_of, DateTime};
use crate::devices::{Climate, ClimateSensor, Eeprom, TimeKeeper};
use crate::error::Error;
use crate::ui::frame::FrameSink;

/// 128x64 monochrome frame buffer, one `u128` per row.
pub struct TestDisplay {
    rows: [u128; 64],
    pub frames: u32,
    pub powered: bool,
}

impl TestDisplay {
    pub fn new() -> Self {
        Self {
            rows: [0; 64],
            frames: 0,
            powered: true,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        (0..128).contains(&x) && (0..64).contains(&y) && (self.rows[y as usize] >> x) & 1 == 1
    }

    pub fn lit(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Lit pixels with `x` inside `x0..x1`.
    pub fn lit_in_columns(&self, x0: i32, x1: i32) -> u32 {
        let mut n = 0;
        for y in 0..64 {
            for x in x0.max(0)..x1.min(128) {
                if self.pixel(x, y) {
                    n += 1;
                }
            }
        }
        n
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if (0..128).contains(&p.x) && (0..64).contains(&p.y) {
                let bit = 1u128 << p.x;
                match color {
                    BinaryColor::On => self.rows[p.y as usize] |= bit,
                    BinaryColor::Off => self.rows[p.y as usize] &= !bit,
                }
            }
        }
        Ok(())
    }
}

impl FrameSink for TestDisplay {
    fn begin_frame(&mut self) {
        self.rows = [0; 64];
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn set_powered(&mut self, on: bool) {
        self.powered = on;
    }
}

/// Blank (0xFF) EEPROM with failure switches.
pub struct MemoryEeprom {
    pub bytes: [u8; 64],
    pub fail: bool,
    pub drop_writes: bool,
}

impl MemoryEeprom {
    pub fn new() -> Self {
        Self {
            bytes: [0xFF; 64],
            fail: false,
            drop_writes: false,
        }
    }
}

impl Eeprom for MemoryEeprom {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Bus);
        }
        let start = usize::from(address);
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Bus);
        }
        if !self.drop_writes {
            let start = usize::from(address);
            self.bytes[start..start + data.len()].copy_from_slice(data);
        }
        Ok(())
    }
}

pub struct FakeClock {
    pub now: DateTime,
    pub fail_set: bool,
    pub sets: u32,
}

impl FakeClock {
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
            fail_set: false,
            sets: 0,
        }
    }
}

impl TimeKeeper for FakeClock {
    fn get_time(&mut self) -> Result<DateTime, Error> {
        Ok(self.now)
    }

    fn set_time(&mut self, time: &DateTime) -> Result<(), Error> {
        if self.fail_set {
            return Err(Error::Bus);
        }
        self.now = *time;
        self.sets += 1;
        Ok(())
    }
}

pub struct FakeSensor {
    pub climate: Climate,
    pub reads: u32,
}

impl FakeSensor {
    pub fn new() -> Self {
        Self {
            climate: Climate {
                temperature_c: 21.5,
                humidity_pct: 40.0,
            },
            reads: 0,
        }
    }
}

impl ClimateSensor for FakeSensor {
    fn read(&mut self) -> Result<Climate, Error> {
        self.reads += 1;
        Ok(self.climate)
    }
}
