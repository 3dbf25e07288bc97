//! Abstract input events, independent of the terminal library.
//!
//! Converted from crossterm events at the TUI boundary so the update logic
//! (and headless or test drivers) never depend on crossterm types.

/// Abstract input key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, Ctrl+u, ...)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Backspace,
    Delete,
}

/// Mouse wheel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}
