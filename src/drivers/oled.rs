//! SSD1306 128x64 OLED as a [`FrameSink`].

use defmt::{error, warn};
use deskclock::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use deskclock::ui::FrameSink;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Concrete display driver, generic over the I²C implementation.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct Oled<I2C> {
    display: Display<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and blank it.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            error!("OLED: init failed");
        }
        display.clear_buffer();
        let _ = display.flush();
        Self { display }
    }
}

impl<I2C> OriginDimensions for Oled<I2C> {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Color = BinaryColor;
    type Error = <Display<I2C> as DrawTarget>::Error;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        self.display.draw_iter(pixels)
    }
}

impl<I2C> FrameSink for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn begin_frame(&mut self) {
        self.display.clear_buffer();
    }

    fn end_frame(&mut self) {
        if self.display.flush().is_err() {
            warn!("OLED: flush failed");
        }
    }

    fn set_powered(&mut self, on: bool) {
        if self.display.set_display_on(on).is_err() {
            warn!("OLED: power {} failed", on);
        }
    }
}
