//! Small drawing helpers shared by all pages.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

pub fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
}

pub fn styled(font: &'static MonoFont<'static>, color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(font, color)
}

/// Horizontally centred, vertically middle-anchored.
pub fn centered() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

/// Left-aligned, vertically middle-anchored.
pub fn left_middle() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Left)
        .baseline(Baseline::Middle)
        .build()
}

/// Rendered width of `text` in `font`.
pub fn text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    let advance = font.character_size.width + font.character_spacing;
    (text.len() as u32 * advance).saturating_sub(font.character_spacing)
}

pub fn fill(color: BinaryColor) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(color)
}

/// A boxed one-line message centred on the page at `offset`.
pub fn draw_toast<D>(target: &mut D, text: &str, offset: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = text_width(&FONT_6X10, text) + 10;
    let h = 16;
    let top_left = Point::new((DISPLAY_WIDTH - w as i32) / 2, (DISPLAY_HEIGHT - h) / 2) + offset;
    let frame = PrimitiveStyleBuilder::new()
        .fill_color(BinaryColor::Off)
        .stroke_color(BinaryColor::On)
        .stroke_width(1)
        .build();
    Rectangle::new(top_left, Size::new(w, h as u32))
        .into_styled(frame)
        .draw(target)?;
    Text::with_text_style(
        text,
        Point::new(DISPLAY_WIDTH / 2, DISPLAY_HEIGHT / 2) + offset,
        text_style(),
        centered(),
    )
    .draw(target)?;
    Ok(())
}
