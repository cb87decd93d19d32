//! Interfaces to the board's peripheral drivers.
//!
//! The drivers themselves live in the firmware binary; the library only
//! sees these traits so every page can be exercised on the host with
//! in-memory fakes.

use crate::calendar::DateTime;
use crate::error::Error;

/// Battery-backed real-time clock.
pub trait TimeKeeper {
    fn get_time(&mut self) -> Result<DateTime, Error>;
    fn set_time(&mut self, time: &DateTime) -> Result<(), Error>;
}

/// One temperature/humidity sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Climate {
    /// Degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity, percent.
    pub humidity_pct: f32,
}

/// Temperature/humidity sensor.
pub trait ClimateSensor {
    fn read(&mut self) -> Result<Climate, Error>;
}

/// Byte-addressable non-volatile memory.
pub trait Eeprom {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Error>;
    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Error>;
}

/// Free-running hardware quadrature counter.
pub trait QuadratureCounter {
    fn count(&self) -> u16;
    fn set_count(&mut self, value: u16);
}
