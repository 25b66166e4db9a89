//! UI widgets around the orbit.
//!
//! - [`StatusBar`] - Top status bar with phase, angle, and focused item
//! - [`FooterHints`] - Bottom keybinding hints

mod footer_hints;
mod status_bar;

pub use footer_hints::{hints_for_phase, FooterHints, KeyHint};
pub use status_bar::{StatusBar, StatusBarContent};
