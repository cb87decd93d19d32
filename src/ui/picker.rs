//! Slot-machine value picker.
//!
//! One engine edits any three fields of a [`DateTime`]. The date and time
//! editors differ only in their [`PickerLayout`].
//!
//! ```text
//! Entering ─pause─▶ ZoomingIn ─▶ Focused ◀─▶ Rolling
//!                      ▲            │
//!                      │      encoder press
//!                 Switching ◀── ZoomingOut
//! ```
//!
//! Confirm from `Focused` writes the edited fields back to the RTC and
//! shows a message; the page leaves once the message expires. Back
//! leaves at any point except while a roll is in progress.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;
use profont::PROFONT_18_POINT;

use super::anim::{ease_in_out, ease_out, lerp, progress, round_px};
use super::draw::centered;
use super::message::{Message, SAVE_FAILED};
use crate::calendar::{clamp_day, days_in_month, wrap_in_range, DateTime};
use crate::config::{
    MESSAGE_MS, PICKER_ENTER_PAUSE_MS, PICKER_ROLL_MS, PICKER_SLOT_HEIGHT, PICKER_ZOOM_MS, YEAR_MAX, YEAR_MIN,
};
use crate::devices::TimeKeeper;
use crate::input::{EventKind, InputEvent};

/// One editable calendar field and its wrap rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Field {
    pub fn get(self, dt: &DateTime) -> u16 {
        match self {
            Field::Year => dt.year,
            Field::Month => u16::from(dt.month),
            Field::Day => u16::from(dt.day),
            Field::Hour => u16::from(dt.hour),
            Field::Minute => u16::from(dt.minute),
            Field::Second => u16::from(dt.second),
        }
    }

    /// Step the field by `delta`, wrapping inside its range. Changing the
    /// year or month clamps the day to the new month length.
    pub fn adjust(self, dt: &mut DateTime, delta: i32) {
        match self {
            Field::Year => {
                dt.year = wrap_in_range(dt.year, delta, YEAR_MIN, YEAR_MAX);
                clamp_day(dt);
            }
            Field::Month => {
                dt.month = wrap_in_range(u16::from(dt.month), delta, 1, 12) as u8;
                clamp_day(dt);
            }
            Field::Day => {
                let last = u16::from(days_in_month(dt.year, dt.month));
                dt.day = wrap_in_range(u16::from(dt.day), delta, 1, last) as u8;
            }
            Field::Hour => dt.hour = wrap_in_range(u16::from(dt.hour), delta, 0, 23) as u8,
            Field::Minute => dt.minute = wrap_in_range(u16::from(dt.minute), delta, 0, 59) as u8,
            Field::Second => dt.second = wrap_in_range(u16::from(dt.second), delta, 0, 59) as u8,
        }
    }

    /// Value one step away from the current one, without touching `dt`.
    pub fn neighbor(self, dt: &DateTime, delta: i32) -> u16 {
        let mut next = *dt;
        self.adjust(&mut next, delta);
        self.get(&next)
    }

    /// Copy this field from `src` into `dst`.
    pub fn copy(self, src: &DateTime, dst: &mut DateTime) {
        match self {
            Field::Year => dst.year = src.year,
            Field::Month => dst.month = src.month,
            Field::Day => dst.day = src.day,
            Field::Hour => dst.hour = src.hour,
            Field::Minute => dst.minute = src.minute,
            Field::Second => dst.second = src.second,
        }
    }

    fn format(self, value: u16) -> String<6> {
        let mut s = String::new();
        let _ = match self {
            Field::Year => write!(s, "{:04}", value),
            _ => write!(s, "{:02}", value),
        };
        s
    }
}

/// Fields, labels and result text of one editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickerLayout {
    pub fields: [Field; 3],
    pub labels: [&'static str; 3],
    pub saved: &'static str,
}

pub const DATE_LAYOUT: PickerLayout = PickerLayout {
    fields: [Field::Year, Field::Month, Field::Day],
    labels: ["Year", "Mon", "Day"],
    saved: "Date Saved!",
};

pub const TIME_LAYOUT: PickerLayout = PickerLayout {
    fields: [Field::Hour, Field::Minute, Field::Second],
    labels: ["Hour", "Min", "Sec"],
    saved: "Time Saved!",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PickerState {
    Entering,
    ZoomingIn,
    Focused,
    ZoomingOut,
    Switching,
    Rolling,
    ShowingMessage,
}

/// Outcome of a picker step, as seen by the owning page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerSignal {
    None,
    /// Leave the page.
    Exit,
}

// Resting positions: value centre x, small value y, label x, label y.
const VALUE_X: [i32; 3] = [21, 64, 107];
const VALUE_Y: i32 = 36;
const LABEL_Y: i32 = 12;
const FOCUS_VALUE: Point = Point::new(64, 36);
const FOCUS_LABEL: Point = Point::new(16, 12);

pub struct SlotPicker {
    layout: PickerLayout,
    edit: DateTime,
    focus: usize,
    state: PickerState,
    state_start_ms: u32,
    /// Zoom progress, 0 = overview, 1 = focused field enlarged.
    zoom: f32,
    roll_offset: f32,
    roll_direction: f32,
    message: Option<Message>,
}

impl SlotPicker {
    pub fn new(layout: PickerLayout) -> Self {
        Self {
            layout,
            edit: DateTime::default(),
            focus: 0,
            state: PickerState::Entering,
            state_start_ms: 0,
            zoom: 0.0,
            roll_offset: 0.0,
            roll_direction: 0.0,
            message: None,
        }
    }

    /// Reset for a fresh page entry, editing a copy of `now`.
    pub fn reset(&mut self, now: DateTime, now_ms: u32) {
        self.edit = now;
        self.focus = 0;
        self.zoom = 0.0;
        self.roll_offset = 0.0;
        self.roll_direction = 0.0;
        self.message = None;
        self.set_state(PickerState::Entering, now_ms);
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Field {
        self.layout.fields[self.focus]
    }

    pub fn value(&self) -> &DateTime {
        &self.edit
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn roll_offset(&self) -> f32 {
        self.roll_offset
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn set_state(&mut self, state: PickerState, now_ms: u32) {
        self.state = state;
        self.state_start_ms = now_ms;
    }

    /// Advance the state machine.
    pub fn tick(&mut self, now_ms: u32) -> PickerSignal {
        match self.state {
            PickerState::Entering => {
                if now_ms.wrapping_sub(self.state_start_ms) >= PICKER_ENTER_PAUSE_MS {
                    self.set_state(PickerState::ZoomingIn, now_ms);
                }
            }
            PickerState::ZoomingIn => {
                self.zoom = progress(self.state_start_ms, PICKER_ZOOM_MS, now_ms);
                if self.zoom >= 1.0 {
                    self.set_state(PickerState::Focused, now_ms);
                }
            }
            PickerState::ZoomingOut => {
                self.zoom = 1.0 - progress(self.state_start_ms, PICKER_ZOOM_MS, now_ms);
                if self.zoom <= 0.0 {
                    self.zoom = 0.0;
                    self.set_state(PickerState::Switching, now_ms);
                }
            }
            PickerState::Switching => {
                self.focus = (self.focus + 1) % self.layout.fields.len();
                self.set_state(PickerState::ZoomingIn, now_ms);
            }
            PickerState::Rolling => {
                let p = progress(self.state_start_ms, PICKER_ROLL_MS, now_ms);
                if p >= 1.0 {
                    self.roll_offset = 0.0;
                    self.set_state(PickerState::Focused, now_ms);
                } else {
                    self.roll_offset = self.roll_direction * PICKER_SLOT_HEIGHT as f32 * (1.0 - ease_out(p));
                }
            }
            PickerState::ShowingMessage => {
                if let Some(m) = self.message {
                    if m.is_expired(now_ms) {
                        self.message = None;
                        self.set_state(PickerState::Focused, now_ms);
                        return PickerSignal::Exit;
                    }
                }
            }
            PickerState::Focused => {}
        }
        PickerSignal::None
    }

    /// Handle one input event. `clock` is only touched on confirm.
    pub fn handle(&mut self, event: &InputEvent, now_ms: u32, clock: &mut dyn TimeKeeper) -> PickerSignal {
        if self.state != PickerState::Focused {
            let leave = event.kind == EventKind::BackPressed && self.state != PickerState::Rolling;
            return if leave { PickerSignal::Exit } else { PickerSignal::None };
        }

        match event.kind {
            EventKind::EncoderRotated(delta) => {
                let field = self.focused_field();
                let before = field.get(&self.edit);
                field.adjust(&mut self.edit, i32::from(delta));
                if field.get(&self.edit) == before {
                    return PickerSignal::None;
                }
                // New value slides in from the side it came from.
                self.roll_direction = if delta > 0 { 1.0 } else { -1.0 };
                self.roll_offset = self.roll_direction * PICKER_SLOT_HEIGHT as f32;
                self.set_state(PickerState::Rolling, now_ms);
            }
            EventKind::EncoderPressed => self.set_state(PickerState::ZoomingOut, now_ms),
            EventKind::ConfirmPressed => {
                let text = self.commit(clock);
                self.message = Some(Message::new(text, now_ms, MESSAGE_MS));
                self.set_state(PickerState::ShowingMessage, now_ms);
            }
            EventKind::BackPressed => return PickerSignal::Exit,
            EventKind::None => {}
        }
        PickerSignal::None
    }

    /// Write the edited fields over a fresh RTC reading.
    fn commit(&self, clock: &mut dyn TimeKeeper) -> &'static str {
        let mut target = match clock.get_time() {
            Ok(t) => t,
            Err(e) => {
                warn!("Picker: RTC read failed ({}), writing edited value", e.as_str());
                self.edit
            }
        };
        for field in self.layout.fields {
            field.copy(&self.edit, &mut target);
        }
        clamp_day(&mut target);

        match clock.set_time(&target) {
            Ok(()) => {
                info!("Picker: saved {}", self.layout.saved);
                self.layout.saved
            }
            Err(e) => {
                error!("Picker: RTC write failed ({})", e.as_str());
                SAVE_FAILED
            }
        }
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let large = MonoTextStyle::new(&PROFONT_18_POINT, BinaryColor::On);
        let z = ease_in_out(self.zoom);

        for (i, field) in self.layout.fields.iter().enumerate() {
            let focused = i == self.focus;
            if !focused && z > 0.1 {
                continue;
            }

            let rest_value = Point::new(VALUE_X[i], VALUE_Y);
            let rest_label = Point::new(VALUE_X[i], LABEL_Y);
            let (value_pos, label_pos) = if focused {
                (lerp_point(rest_value, FOCUS_VALUE, z), lerp_point(rest_label, FOCUS_LABEL, z))
            } else {
                (rest_value, rest_label)
            };

            Text::with_text_style(self.layout.labels[i], label_pos + offset, small, centered()).draw(target)?;

            let value = field.get(&self.edit);
            let rolling = matches!(self.state, PickerState::Focused | PickerState::Rolling);
            if focused && rolling {
                self.draw_reel(target, *field, value_pos + offset, large)?;
            } else {
                let style = if focused && z > 0.5 { large } else { small };
                Text::with_text_style(&field.format(value), value_pos + offset, style, centered()).draw(target)?;
            }
        }

        if let Some(m) = &self.message {
            m.draw(target, offset)?;
        }
        Ok(())
    }

    /// Current value with its neighbours above and below, plus a cursor.
    fn draw_reel<D>(
        &self,
        target: &mut D,
        field: Field,
        center: Point,
        style: MonoTextStyle<'static, BinaryColor>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let roll = round_px(self.roll_offset);

        let value = field.get(&self.edit);
        let above = field.neighbor(&self.edit, -1);
        let below = field.neighbor(&self.edit, 1);
        let dim = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        Text::with_text_style(&field.format(value), center + Point::new(0, roll), style, centered()).draw(target)?;
        Text::with_text_style(
            &field.format(above),
            center + Point::new(0, roll - PICKER_SLOT_HEIGHT),
            dim,
            centered(),
        )
        .draw(target)?;
        Text::with_text_style(
            &field.format(below),
            center + Point::new(0, roll + PICKER_SLOT_HEIGHT),
            dim,
            centered(),
        )
        .draw(target)?;

        let half = text_half_width(&PROFONT_18_POINT, &field.format(value));
        Text::with_text_style(">", center - Point::new(half + 8, 0), dim, centered()).draw(target)?;
        Ok(())
    }
}

fn text_half_width(font: &MonoFont<'_>, text: &str) -> i32 {
    super::draw::text_width(font, text) as i32 / 2
}

fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(
        round_px(lerp(a.x as f32, b.x as f32, t)),
        round_px(lerp(a.y as f32, b.y as f32, t)),
    )
}
