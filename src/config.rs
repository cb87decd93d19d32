//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and layout
//! constants live here so they can be tuned in one place.

// Identity

/// Product name shown on the info page.
pub const APP_NAME: &str = "DeskClock";

/// Firmware version shown on the info page.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Author line shown on the info page.
pub const APP_AUTHOR: &str = "deskclock contributors";

// Input

/// Period of the button/encoder scan timer (ms).
pub const SCAN_INTERVAL_MS: u64 = 10;

/// Consecutive asserted scans before a press is accepted.
pub const DEBOUNCE_SCANS: u8 = 2;

/// Key samples closer together than this are dropped (ms).
pub const MIN_KEY_SAMPLE_GAP_MS: u32 = SCAN_INTERVAL_MS as u32 / 2;

/// Capacity of the input event queue.
pub const EVENT_QUEUE_CAPACITY: usize = 32;

// GPIO pin assignments (nRF52840-DK style board)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are selected in `main.rs`.
//
//   Button BACK      → P0.11
//   Button CONFIRM   → P0.12
//   Encoder KEY      → P0.24
//   Encoder A / B    → P0.31 / P0.30 (QDEC)
//   I²C SDA          → P0.26
//   I²C SCL          → P0.27

// Display

/// OLED width in pixels.
pub const DISPLAY_WIDTH: i32 = 128;

/// OLED height in pixels.
pub const DISPLAY_HEIGHT: i32 = 64;

// Navigation

/// Maximum depth of the back-navigation history.
pub const HISTORY_DEPTH: usize = 8;

/// Duration of the page slide transition (ms).
pub const TRANSITION_MS: u32 = 250;

/// Delay between two main-loop ticks (ms).
pub const MAIN_LOOP_INTERVAL_MS: u64 = 5;

// Page refresh cadence (ms)

pub const HOME_REFRESH_MS: u32 = 100;
pub const MENU_REFRESH_MS: u32 = 30;
pub const OPTION_REFRESH_MS: u32 = 30;
pub const PICKER_REFRESH_MS: u32 = 16;
pub const INFO_REFRESH_MS: u32 = 10_000;

// Widgets

/// Highlight move inside menus (ms).
pub const MENU_HIGHLIGHT_MS: u32 = 150;

/// Highlight hop within the visible window of an option list (ms).
pub const LIST_HOP_MS: u32 = 120;

/// Highlight move when the option list viewport scrolls (ms).
pub const LIST_SCROLL_MS: u32 = 200;

/// Height of one list row (px).
pub const LIST_ITEM_HEIGHT: i32 = 16;

/// How long result messages ("Settings Saved!") stay up (ms).
pub const MESSAGE_MS: u32 = 1_000;

/// How long the boot "Settings load failed" popup stays up (ms).
pub const LOAD_FAILED_MESSAGE_MS: u32 = 3_000;

/// Pause before the picker starts zooming into its first field (ms).
pub const PICKER_ENTER_PAUSE_MS: u32 = 800;

/// Picker zoom in/out duration (ms).
pub const PICKER_ZOOM_MS: u32 = 600;

/// Picker value roll duration (ms).
pub const PICKER_ROLL_MS: u32 = 150;

/// Vertical distance between stacked picker values (px).
pub const PICKER_SLOT_HEIGHT: i32 = 22;

// Sensors

/// Interval between two climate sensor reads on the home page (ms).
pub const CLIMATE_REFRESH_MS: u32 = 30_000;

// Persistent settings

/// EEPROM byte address of the settings record.
pub const SETTINGS_EEPROM_ADDRESS: u16 = 0x0000;

/// Magic number marking a valid settings record.
pub const SETTINGS_MAGIC: u32 = 0xDEAD_BEEF;

// Time-keeping

/// First year the date editor offers.
pub const YEAR_MIN: u16 = 2000;

/// Last year the date editor offers.
pub const YEAR_MAX: u16 = 2099;
