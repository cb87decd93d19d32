//! AT24C32 EEPROM (the 4 KiB part fitted on most DS3231 modules).

use deskclock::devices::Eeprom;
use deskclock::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

const ADDRESS: u8 = 0x57;
const PAGE_SIZE: usize = 32;
const CAPACITY: usize = 4096;
const WRITE_CYCLE_MS: u32 = 10;

pub struct At24c32<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> At24c32<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    fn check_range(address: u16, len: usize) -> Result<(), Error> {
        if usize::from(address) + len > CAPACITY {
            return Err(Error::BufferOverflow);
        }
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> Eeprom for At24c32<I2C, D> {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Error> {
        Self::check_range(address, buf.len())?;
        self.i2c
            .write_read(ADDRESS, &address.to_be_bytes(), buf)
            .map_err(|_| Error::Bus)
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Error> {
        Self::check_range(address, data.len())?;

        let mut offset = 0;
        while offset < data.len() {
            let at = address as usize + offset;
            // A page write must not cross a page boundary.
            let room = PAGE_SIZE - at % PAGE_SIZE;
            let chunk = room.min(data.len() - offset);

            let mut frame = [0u8; 2 + PAGE_SIZE];
            frame[..2].copy_from_slice(&(at as u16).to_be_bytes());
            frame[2..2 + chunk].copy_from_slice(&data[offset..offset + chunk]);
            self.i2c
                .write(ADDRESS, &frame[..2 + chunk])
                .map_err(|_| Error::Bus)?;
            self.delay.delay_ms(WRITE_CYCLE_MS);

            offset += chunk;
        }
        Ok(())
    }
}
