//! Display abstraction used by the navigation engine.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A monochrome frame buffer that can be cleared, drawn into and pushed
/// to the panel.
///
/// On the device this is the buffered SSD1306 driver; tests use an
/// in-memory buffer.
pub trait FrameSink: DrawTarget<Color = BinaryColor> {
    /// Clear the back buffer before drawing a new frame.
    fn begin_frame(&mut self);

    /// Push the back buffer to the panel.
    fn end_frame(&mut self);

    /// Turn the panel on or off. The buffer contents are kept.
    fn set_powered(&mut self, _on: bool) {}

    /// Frame width in pixels.
    fn width(&self) -> i32 {
        self.bounding_box().size.width as i32
    }
}
