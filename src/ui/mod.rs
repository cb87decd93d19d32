//! User interface subsystem - OLED pages driven by buttons and the encoder.
//!
//! The navigation engine owns which page is live and slides between
//! pages; pages are built from two reusable widgets.
//!
//! ## Components
//!
//! - **Navigation**: page lifecycle, slide transitions, back history
//! - **List selector**: menus and settings lists with a gliding highlight
//! - **Slot picker**: the date and time editors

pub mod anim;
pub mod draw;
pub mod frame;
pub mod list;
pub mod message;
pub mod nav;
pub mod pages;
pub mod picker;

pub use frame::FrameSink;
pub use nav::{Mode, Nav, NavigationEngine, PageSet, SwitchOutcome};
pub use pages::{ClockPages, PageId, Services};
