//! Blocking alert dialog state.
//!
//! Data model only; the widget lives in woundscan-tui.

use woundscan_core::{DetectionError, ValidationError, ADVISORY_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl AlertState {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Professional-care advisory, shown when a class has no reference data
    pub fn advisory() -> Self {
        Self::info("No Reference Data", ADVISORY_MESSAGE)
    }

    pub fn invalid_file(error: &ValidationError) -> Self {
        Self::error("Invalid File", error.to_string())
    }

    pub fn detection_failed(error: &DetectionError) -> Self {
        Self::error(
            "Detection Failed",
            format!("Error during detection: {}", error),
        )
    }

    pub fn no_file_selected() -> Self {
        Self::info("No Image", "Please select an image first.")
    }
}
