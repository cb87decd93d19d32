//! DS3231 real-time clock.

use defmt::info;
use deskclock::calendar::{weekday_of, DateTime};
use deskclock::devices::TimeKeeper;
use deskclock::Error;
use embedded_hal::i2c::I2c;

const ADDRESS: u8 = 0x68;
const REG_SECONDS: u8 = 0x00;

const HOUR_12H: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const MONTH_CENTURY: u8 = 0x80;

fn bcd_to_bin(v: u8) -> u8 {
    (v >> 4) * 10 + (v & 0x0F)
}

fn bin_to_bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    fn decode_hour(raw: u8) -> u8 {
        if raw & HOUR_12H == 0 {
            return bcd_to_bin(raw & 0x3F);
        }
        let hour = bcd_to_bin(raw & 0x1F) % 12;
        if raw & HOUR_PM != 0 {
            hour + 12
        } else {
            hour
        }
    }
}

impl<I2C: I2c> TimeKeeper for Ds3231<I2C> {
    fn get_time(&mut self) -> Result<DateTime, Error> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(ADDRESS, &[REG_SECONDS], &mut regs)
            .map_err(|_| Error::Bus)?;

        let century = if regs[5] & MONTH_CENTURY != 0 { 100 } else { 0 };
        let time = DateTime {
            second: bcd_to_bin(regs[0] & 0x7F),
            minute: bcd_to_bin(regs[1] & 0x7F),
            hour: Self::decode_hour(regs[2]),
            weekday: bcd_to_bin(regs[3] & 0x07),
            day: bcd_to_bin(regs[4] & 0x3F),
            month: bcd_to_bin(regs[5] & 0x1F),
            year: 2000 + century + u16::from(bcd_to_bin(regs[6])),
        };
        if !time.is_valid() {
            return Err(Error::InvalidDateTime);
        }
        Ok(time)
    }

    fn set_time(&mut self, time: &DateTime) -> Result<(), Error> {
        if !time.is_valid() {
            return Err(Error::InvalidDateTime);
        }
        // Stored weekday is derived, never trusted from the caller.
        let weekday = weekday_of(time.year, time.month, time.day);
        let frame = [
            REG_SECONDS,
            bin_to_bcd(time.second),
            bin_to_bcd(time.minute),
            bin_to_bcd(time.hour),
            weekday,
            bin_to_bcd(time.day),
            bin_to_bcd(time.month),
            bin_to_bcd((time.year % 100) as u8),
        ];
        self.i2c.write(ADDRESS, &frame).map_err(|_| Error::Bus)?;
        info!(
            "RTC: set {}-{}-{} {}:{}:{}",
            time.year, time.month, time.day, time.hour, time.minute, time.second
        );
        Ok(())
    }
}
