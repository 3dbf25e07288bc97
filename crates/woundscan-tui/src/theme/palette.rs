//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43); // Modal/popup backgrounds

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const TEXT_BRIGHT: Color = Color::White;
pub const CONTRAST_FG: Color = Color::Black; // Text on accent backgrounds

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // Success / reference data available
pub const STATUS_RED: Color = Color::Red; // Errors
pub const STATUS_YELLOW: Color = Color::Yellow; // In progress / key hints
pub const STATUS_BLUE: Color = Color::Blue; // Info

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);
