//! AHT20 temperature/humidity sensor.

use deskclock::devices::{Climate, ClimateSensor};
use deskclock::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

const ADDRESS: u8 = 0x38;
const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];
const CMD_MEASURE: [u8; 3] = [0xAC, 0x33, 0x00];
const MEASURE_MS: u32 = 80;

const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x08;

pub struct Aht20<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> Aht20<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Load the calibration coefficients if the sensor reports it has not.
    pub fn init(&mut self) -> Result<(), Error> {
        self.delay.delay_ms(40);
        let mut status = [0u8; 1];
        self.i2c.read(ADDRESS, &mut status).map_err(|_| Error::Bus)?;
        if status[0] & STATUS_CALIBRATED == 0 {
            self.i2c.write(ADDRESS, &CMD_INIT).map_err(|_| Error::Bus)?;
            self.delay.delay_ms(10);
        }
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> ClimateSensor for Aht20<I2C, D> {
    fn read(&mut self) -> Result<Climate, Error> {
        self.i2c.write(ADDRESS, &CMD_MEASURE).map_err(|_| Error::Bus)?;
        self.delay.delay_ms(MEASURE_MS);

        let mut raw = [0u8; 6];
        self.i2c.read(ADDRESS, &mut raw).map_err(|_| Error::Bus)?;
        if raw[0] & STATUS_BUSY != 0 {
            return Err(Error::SensorNotReady);
        }

        let humidity = (u32::from(raw[1]) << 12) | (u32::from(raw[2]) << 4) | (u32::from(raw[3]) >> 4);
        let temperature = (u32::from(raw[3] & 0x0F) << 16) | (u32::from(raw[4]) << 8) | u32::from(raw[5]);

        const FULL_SCALE: f32 = (1u32 << 20) as f32;
        Ok(Climate {
            temperature_c: temperature as f32 * 200.0 / FULL_SCALE - 50.0,
            humidity_pct: humidity as f32 * 100.0 / FULL_SCALE,
        })
    }
}
