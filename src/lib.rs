//! Desk clock firmware core.
//!
//! Everything that does not touch hardware registers lives here so it
//! can be tested on the host:
//!
//! - input pipeline (debounce, encoder deltas, interrupt-safe queue)
//! - page navigation engine and its widgets
//! - pages, settings record, screen power policy
//!
//! Usage: `cargo test`
//!
//! The embedded binary (`src/main.rs`, feature `embedded`) adds the
//! drivers and the Embassy tasks on top of this crate.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Logging
// ═══════════════════════════════════════════════════════════════════════════

#[macro_use]
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════

pub mod app;
pub mod calendar;
pub mod config;
pub mod devices;
pub mod error;
pub mod input;
pub mod power;
pub mod settings;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::App;
pub use error::Error;
