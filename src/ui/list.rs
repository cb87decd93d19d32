//! Animated list selector.
//!
//! A vertical list with an inverted highlight bar that glides between
//! rows. Longer lists scroll a fixed-size viewport; the highlight move
//! takes longer when the viewport had to scroll than for a hop inside
//! the visible rows.
//!
//! While the highlight is moving every input is ignored. While a result
//! message is up only Back is honoured.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;

use super::anim::{round_px, Tween};
use super::draw::{fill, left_middle};
use super::message::Message;
use crate::config::{LIST_ITEM_HEIGHT, MESSAGE_MS};
use crate::input::{EventKind, InputEvent};

/// Geometry and timing of one list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListStyle {
    pub top_y: i32,
    pub left_x: i32,
    pub width: u32,
    pub item_height: i32,
    pub text_x: i32,
    pub visible_items: usize,
    /// Highlight move inside the visible rows.
    pub hop_ms: u32,
    /// Highlight move when the viewport scrolled.
    pub scroll_ms: u32,
}

impl ListStyle {
    pub const fn new(top_y: i32, visible_items: usize, hop_ms: u32, scroll_ms: u32) -> Self {
        Self {
            top_y,
            left_x: 4,
            width: 120,
            item_height: LIST_ITEM_HEIGHT,
            text_x: 10,
            visible_items,
            hop_ms,
            scroll_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListState {
    Idle,
    AnimatingHighlight,
    ShowingMessage,
}

/// What an input event meant to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListInput {
    Ignored,
    Moved,
    Confirmed(usize),
    Back,
}

pub struct ListSelector {
    items: &'static [&'static str],
    style: ListStyle,
    selected: usize,
    viewport_top: usize,
    state: ListState,
    highlight: Tween,
    message: Option<Message>,
}

impl ListSelector {
    pub fn new(items: &'static [&'static str], style: ListStyle) -> Self {
        let mut list = Self {
            items,
            style,
            selected: 0,
            viewport_top: 0,
            state: ListState::Idle,
            highlight: Tween::settled(0.0),
            message: None,
        };
        list.reset(0);
        list
    }

    /// Reset for a fresh page entry with `selected` highlighted.
    pub fn reset(&mut self, selected: usize) {
        self.selected = if selected < self.items.len() { selected } else { 0 };
        let visible = self.style.visible_items.max(1);
        self.viewport_top = self.selected.saturating_sub(visible - 1);
        self.state = ListState::Idle;
        self.message = None;
        self.highlight.snap(self.row_y(self.selected) as f32);
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn highlight(&self) -> &Tween {
        &self.highlight
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Screen y of row `index` for the current viewport.
    fn row_y(&self, index: usize) -> i32 {
        self.style.top_y + (index as i32 - self.viewport_top as i32) * self.style.item_height
    }

    pub fn handle(&mut self, event: &InputEvent, now_ms: u32) -> ListInput {
        match self.state {
            ListState::AnimatingHighlight => return ListInput::Ignored,
            ListState::ShowingMessage => {
                return if event.kind == EventKind::BackPressed {
                    ListInput::Back
                } else {
                    ListInput::Ignored
                };
            }
            ListState::Idle => {}
        }

        match event.kind {
            EventKind::EncoderRotated(delta) => self.rotate(delta, now_ms),
            EventKind::ConfirmPressed => ListInput::Confirmed(self.selected),
            EventKind::BackPressed => ListInput::Back,
            _ => ListInput::Ignored,
        }
    }

    fn rotate(&mut self, delta: i16, now_ms: u32) -> ListInput {
        let count = self.items.len() as i32;
        if count == 0 {
            return ListInput::Ignored;
        }
        let next = (self.selected as i32 + i32::from(delta)).rem_euclid(count) as usize;
        if next == self.selected {
            return ListInput::Ignored;
        }

        let visible = self.style.visible_items.max(1);
        let mut scrolled = false;
        if next < self.viewport_top {
            self.viewport_top = next;
            scrolled = true;
        } else if next >= self.viewport_top + visible {
            self.viewport_top = next + 1 - visible;
            scrolled = true;
        }
        self.selected = next;

        let duration = if scrolled {
            self.style.scroll_ms
        } else {
            self.style.hop_ms
        };
        // Rows jump with the viewport; only the bar glides.
        if scrolled {
            let current = self.highlight.current;
            self.highlight.snap(current);
        }
        self.highlight.retarget(self.row_y(next) as f32, duration, now_ms);
        self.state = ListState::AnimatingHighlight;
        ListInput::Moved
    }

    /// Show a result message for the standard duration.
    pub fn show_message(&mut self, text: &'static str, now_ms: u32) {
        self.message = Some(Message::new(text, now_ms, MESSAGE_MS));
        self.state = ListState::ShowingMessage;
    }

    /// Advance animations. Returns `true` once a message has run its
    /// course (the caller should navigate back).
    pub fn tick(&mut self, now_ms: u32) -> bool {
        match self.state {
            ListState::AnimatingHighlight => {
                if self.highlight.advance(now_ms) {
                    self.state = ListState::Idle;
                }
                false
            }
            ListState::ShowingMessage => match self.message {
                Some(m) if m.is_expired(now_ms) => {
                    self.message = None;
                    self.state = ListState::Idle;
                    true
                }
                _ => false,
            },
            ListState::Idle => false,
        }
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let s = &self.style;
        let on = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let off = MonoTextStyle::new(&FONT_6X10, BinaryColor::Off);

        let first = self.viewport_top;
        let last = (first + s.visible_items).min(self.items.len());
        for (i, item) in self.items.iter().enumerate().take(last).skip(first) {
            let pos = Point::new(s.text_x, self.row_y(i) + s.item_height / 2) + offset;
            Text::with_text_style(item, pos, on, left_middle()).draw(target)?;
        }

        let bar = Rectangle::new(
            Point::new(s.left_x, round_px(self.highlight.current)) + offset,
            Size::new(s.width, s.item_height as u32),
        );
        bar.into_styled(fill(BinaryColor::On)).draw(target)?;

        // Re-draw the rows under the bar in inverse colour.
        let mut inverted = target.clipped(&bar);
        for (i, item) in self.items.iter().enumerate().take(last).skip(first) {
            let pos = Point::new(s.text_x, self.row_y(i) + s.item_height / 2) + offset;
            Text::with_text_style(item, pos, off, left_middle()).draw(&mut inverted)?;
        }

        if let Some(m) = &self.message {
            m.draw(target, offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDisplay;

    const FIVE: [&str; 5] = ["Never", "30s", "1min", "5min", "10min"];
    const THREE: [&str; 3] = ["Display", "Time Set", "Info"];

    fn rot(delta: i16) -> InputEvent {
        InputEvent::new(EventKind::EncoderRotated(delta), 0)
    }

    fn press(kind: EventKind) -> InputEvent {
        InputEvent::new(kind, 0)
    }

    fn five() -> ListSelector {
        ListSelector::new(&FIVE, ListStyle::new(0, 4, 120, 200))
    }

    #[test]
    fn list_rotation_wraps_both_ways() {
        let mut l = ListSelector::new(&THREE, ListStyle::new(8, 4, 150, 150));
        assert_eq!(l.handle(&rot(-1), 0), ListInput::Moved);
        assert_eq!(l.selected(), 2);
        l.tick(1_000);
        assert_eq!(l.handle(&rot(1), 1_000), ListInput::Moved);
        assert_eq!(l.selected(), 0);
    }

    #[test]
    fn list_full_turn_is_ignored() {
        let mut l = ListSelector::new(&THREE, ListStyle::new(8, 4, 150, 150));
        assert_eq!(l.handle(&rot(3), 0), ListInput::Ignored);
        assert_eq!(l.state(), ListState::Idle);
    }

    #[test]
    fn list_hop_inside_viewport_uses_short_duration() {
        let mut l = five();
        l.handle(&rot(1), 100);
        assert_eq!(l.viewport_top(), 0);
        assert_eq!(l.highlight().duration_ms, 120);
        assert_eq!(l.highlight().target, 16.0);
    }

    #[test]
    fn list_scroll_uses_long_duration() {
        let mut l = five();
        l.reset(3);
        assert_eq!(l.handle(&rot(1), 100), ListInput::Moved);
        assert_eq!(l.selected(), 4);
        assert_eq!(l.viewport_top(), 1);
        assert_eq!(l.highlight().duration_ms, 200);
        assert_eq!(l.highlight().target, 48.0);
    }

    #[test]
    fn list_wrap_to_top_scrolls_viewport_back() {
        let mut l = five();
        l.reset(4);
        assert_eq!(l.viewport_top(), 1);
        l.handle(&rot(1), 0);
        assert_eq!(l.selected(), 0);
        assert_eq!(l.viewport_top(), 0);
        assert_eq!(l.highlight().duration_ms, 200);
    }

    #[test]
    fn list_input_ignored_while_animating() {
        let mut l = five();
        l.handle(&rot(1), 0);
        assert_eq!(l.handle(&rot(1), 50), ListInput::Ignored);
        assert_eq!(l.handle(&press(EventKind::ConfirmPressed), 50), ListInput::Ignored);
        assert_eq!(l.handle(&press(EventKind::BackPressed), 50), ListInput::Ignored);
        assert!(!l.tick(200));
        assert_eq!(l.state(), ListState::Idle);
        assert_eq!(l.handle(&press(EventKind::ConfirmPressed), 250), ListInput::Confirmed(1));
    }

    #[test]
    fn list_message_only_honours_back() {
        let mut l = five();
        l.show_message("Settings Saved!", 0);
        assert_eq!(l.handle(&rot(1), 10), ListInput::Ignored);
        assert_eq!(l.handle(&press(EventKind::ConfirmPressed), 10), ListInput::Ignored);
        assert_eq!(l.handle(&press(EventKind::BackPressed), 10), ListInput::Back);
    }

    #[test]
    fn list_message_expires_after_one_second() {
        let mut l = five();
        l.show_message("Settings Saved!", 500);
        assert!(!l.tick(1_499));
        assert!(l.tick(1_500));
        assert_eq!(l.state(), ListState::Idle);
        assert!(l.message().is_none());
    }

    #[test]
    fn list_reset_keeps_selection_visible() {
        let mut l = five();
        l.reset(4);
        assert_eq!(l.selected(), 4);
        assert_eq!(l.highlight().current, 48.0);
        l.reset(9);
        assert_eq!(l.selected(), 0);
    }

    #[test]
    fn list_draws_highlight_bar() {
        let l = five();
        let mut d = TestDisplay::new();
        l.draw(&mut d, Point::zero()).unwrap();
        // Bar edge on row 0 is solid, text below it is drawn.
        assert!(d.pixel(4, 0));
        assert!(d.pixel(123, 15));
        assert!(!d.pixel(124, 0));
        assert!(d.lit_in_columns(0, 128) > 120 * 16 / 2);
    }

    #[test]
    fn list_draw_honours_offset() {
        let l = five();
        let mut d = TestDisplay::new();
        l.draw(&mut d, Point::new(128, 0)).unwrap();
        assert_eq!(d.lit(), 0);
    }
}
