//! woundscan-tui - Terminal UI for Wound Scan
//!
//! This crate provides the ratatui-based terminal interface on top of the
//! state machine in woundscan-app: terminal event polling, the view function
//! and the widgets it draws.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
