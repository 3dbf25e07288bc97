//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `mouse`: Click hit-testing against the last rendered frame

pub(crate) mod keys;
pub(crate) mod mouse;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use crate::message::Message;
use woundscan_core::StagedFile;

// Re-export main entry point
pub use update::update;

// Re-export functions used by internal tests
#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Read an image file in the background
    LoadCandidate { path: PathBuf },

    /// Submit a staged image; the result comes back tagged with `request_id`
    RunDetection { request_id: u64, file: StagedFile },

    /// Abort the detection task in flight, if any
    CancelDetection,

    /// Populate the wound info catalog
    LoadCatalog,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
