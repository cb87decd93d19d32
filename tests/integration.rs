//! End-to-end behaviour of the clock UI on host fakes.

mod common;

use common::{Memory, Rig, Rtc};
use deskclock::config::EVENT_QUEUE_CAPACITY;
use deskclock::input::{EventKind, EventQueue, InputEvent};
use deskclock::settings::{AutoOff, Language, Settings, SettingsStore};
use deskclock::ui::PageId;

fn rig_with(settings: Settings) -> Rig {
    Rig::new(Rtc::at(2024, 2, 29, 12, 0, 0), Memory::holding(settings))
}

#[test]
fn boot_lands_on_home_and_draws() {
    let mut rig = rig_with(Settings::default());
    rig.run(50);
    assert_eq!(rig.current(), PageId::Home);
    assert!(rig.screen.frames >= 1);
    assert!(rig.screen.lit > 0);
    assert!(rig.app.engine().pages().home_page().message().is_none());
}

#[test]
fn blank_eeprom_shows_load_failure_and_writes_defaults() {
    let mut rig = Rig::new(Rtc::at(2024, 1, 1, 0, 0, 0), Memory::blank());
    let message = rig.app.engine().pages().home_page().message().map(|m| m.text);
    assert_eq!(message, Some("Settings load failed"));

    rig.run(3_100);
    assert!(rig.app.engine().pages().home_page().message().is_none());

    let stored = rig.app.engine_mut().pages_mut().services_mut().store.load();
    assert_eq!(stored, Ok(Settings::default()));
}

#[test]
fn menu_walk_and_back() {
    let mut rig = rig_with(Settings::default());
    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.current(), PageId::MainMenu);

    rig.input(EventKind::EncoderRotated(2));
    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.current(), PageId::Info);
    assert_eq!(rig.app.engine().history(), &[PageId::Home, PageId::MainMenu]);

    rig.input(EventKind::EncoderPressed);
    assert_eq!(rig.current(), PageId::MainMenu);
    rig.input(EventKind::BackPressed);
    assert_eq!(rig.current(), PageId::Home);
    assert_eq!(rig.app.engine().history_depth(), 0);
}

#[test]
fn idle_timeout_returns_home_and_blanks_screen() {
    let mut rig = rig_with(Settings {
        auto_off: AutoOff::Min1,
        ..Settings::default()
    });
    rig.input(EventKind::ConfirmPressed);
    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.current(), PageId::DisplayMenu);
    assert_eq!(rig.app.engine().history_depth(), 2);

    rig.run(59_000);
    assert!(rig.app.is_screen_on());

    rig.run(2_000);
    assert!(!rig.app.is_screen_on());
    assert!(!rig.screen.powered);
    assert_eq!(rig.current(), PageId::Home);
    assert_eq!(rig.app.engine().history_depth(), 0);
    assert!(!rig.app.engine().is_transitioning());

    let frames = rig.screen.frames;
    rig.run(1_000);
    assert_eq!(rig.screen.frames, frames);
}

#[test]
fn wake_press_is_swallowed() {
    let mut rig = rig_with(Settings {
        auto_off: AutoOff::Secs30,
        ..Settings::default()
    });
    rig.run(31_000);
    assert!(!rig.app.is_screen_on());

    rig.queue.push(InputEvent::new(EventKind::ConfirmPressed, rig.now_ms));
    rig.queue.push(InputEvent::new(EventKind::EncoderRotated(1), rig.now_ms));
    rig.run(400);
    assert!(rig.app.is_screen_on());
    assert!(rig.screen.powered);
    assert!(rig.queue.is_empty());
    assert_eq!(rig.current(), PageId::Home);

    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.current(), PageId::MainMenu);
}

#[test]
fn never_auto_off_keeps_screen_on() {
    let mut rig = rig_with(Settings::default());
    rig.run(15 * 60 * 1_000);
    assert!(rig.app.is_screen_on());
}

#[test]
fn language_change_is_saved_and_page_closes() {
    let mut rig = rig_with(Settings::default());
    rig.input(EventKind::ConfirmPressed); // Main menu
    rig.input(EventKind::ConfirmPressed); // Display
    rig.input(EventKind::ConfirmPressed); // Language
    assert_eq!(rig.current(), PageId::Language);

    rig.input(EventKind::EncoderRotated(1));
    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.current(), PageId::Language);
    assert_eq!(rig.app.engine().pages().settings().language, Language::Chinese);

    rig.run(1_000);
    assert_eq!(rig.current(), PageId::DisplayMenu);

    let stored = rig.app.engine_mut().pages_mut().services_mut().store.load();
    assert_eq!(stored.map(|s| s.language), Ok(Language::Chinese));
}

#[test]
fn auto_off_change_applies_immediately() {
    let mut rig = rig_with(Settings::default());
    rig.input(EventKind::ConfirmPressed); // Main menu
    rig.input(EventKind::ConfirmPressed); // Display
    rig.input(EventKind::EncoderRotated(1));
    rig.input(EventKind::ConfirmPressed); // Auto-Off
    assert_eq!(rig.current(), PageId::AutoOff);

    rig.input(EventKind::EncoderRotated(1)); // 30s
    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.app.engine().pages().settings().auto_off, AutoOff::Secs30);

    rig.run(31_000);
    assert!(!rig.app.is_screen_on());
    assert_eq!(rig.current(), PageId::Home);
}

#[test]
fn date_editor_clamps_leap_day_and_writes_rtc() {
    let mut rig = rig_with(Settings::default());
    rig.input(EventKind::ConfirmPressed); // Main menu
    rig.input(EventKind::EncoderRotated(1));
    rig.input(EventKind::ConfirmPressed); // Time Set
    rig.input(EventKind::ConfirmPressed); // Date
    assert_eq!(rig.current(), PageId::Date);

    // Intro pause plus zoom onto the year.
    rig.run(1_500);
    rig.input(EventKind::EncoderRotated(1));
    rig.input(EventKind::ConfirmPressed);
    assert_eq!(rig.rtc().sets, 1);
    let now = rig.rtc().now;
    assert_eq!((now.year, now.month, now.day), (2025, 2, 28));
    assert_eq!((now.hour, now.minute), (12, 0));

    rig.run(1_000);
    assert_eq!(rig.current(), PageId::TimeMenu);
}

#[test]
fn editor_back_leaves_rtc_untouched() {
    let mut rig = rig_with(Settings::default());
    rig.input(EventKind::ConfirmPressed);
    rig.input(EventKind::EncoderRotated(1));
    rig.input(EventKind::ConfirmPressed);
    rig.input(EventKind::EncoderRotated(1));
    rig.input(EventKind::ConfirmPressed); // Time
    assert_eq!(rig.current(), PageId::Time);

    rig.input(EventKind::BackPressed);
    assert_eq!(rig.current(), PageId::TimeMenu);
    assert_eq!(rig.rtc().sets, 0);
}

#[test]
fn queue_drops_event_past_capacity() {
    let queue: EventQueue = EventQueue::new();
    for i in 0..EVENT_QUEUE_CAPACITY as u32 {
        assert!(queue.push(InputEvent::new(EventKind::EncoderRotated(1), i)));
    }
    assert!(!queue.push(InputEvent::new(EventKind::BackPressed, 99)));
    assert_eq!(queue.len(), EVENT_QUEUE_CAPACITY);
    assert_eq!(queue.pop().map(|e| e.timestamp), Some(0));
}
