//! Blocking I²C drivers for the clock's peripherals.
//!
//! All four devices share one TWIM bus through
//! `embedded_hal_bus::i2c::RefCellDevice`; each driver is generic over
//! `embedded_hal::i2c::I2c` and maps bus failures to [`Error::Bus`].
//!
//! [`Error::Bus`]: deskclock::Error::Bus

pub mod aht20;
pub mod at24c32;
pub mod ds3231;
pub mod oled;

pub use aht20::Aht20;
pub use at24c32::At24c32;
pub use ds3231::Ds3231;
pub use oled::Oled;
