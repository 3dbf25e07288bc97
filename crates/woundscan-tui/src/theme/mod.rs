//! Centralized theme for the Wound Scan TUI.
//!
//! - `palette`: raw color constants
//! - `styles`: semantic style builder functions

pub mod palette;
pub mod styles;
