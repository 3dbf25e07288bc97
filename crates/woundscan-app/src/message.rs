//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use crate::file_selector::CandidateFile;
use crate::input_key::{InputKey, ScrollDirection};
use woundscan_client::WoundCatalogMap;
use woundscan_core::{CatalogLoadError, DetectionError, DetectionResult};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Left click at a terminal cell
    MouseClick { column: u16, row: u16 },

    /// Mouse wheel
    MouseScroll(ScrollDirection),

    /// Tick event for periodic updates
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // File Selection
    // ─────────────────────────────────────────────────────────
    /// Show the path prompt
    OpenPathPrompt,
    /// Accept the path typed into the prompt
    SubmitPath,
    /// Dismiss the path prompt without selecting
    CancelPathPrompt,
    /// Read an image from disk in the background
    LoadFile(PathBuf),
    /// Image bytes read, ready for validation
    FileLoaded(CandidateFile),
    /// Image could not be read
    FileLoadFailed { path: PathBuf, error: String },
    /// Remove the staged image
    ClearFile,

    // ─────────────────────────────────────────────────────────
    // Detection
    // ─────────────────────────────────────────────────────────
    /// Submit the staged image
    StartDetection,
    /// Detection response for request `request_id`
    DetectionCompleted {
        request_id: u64,
        result: DetectionResult,
    },
    /// Detection failure for request `request_id`
    DetectionFailed {
        request_id: u64,
        error: DetectionError,
    },
    /// Drop staged image, results and any request in flight
    Reset,

    // ─────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────
    CatalogLoaded(WoundCatalogMap),
    CatalogLoadFailed(CatalogLoadError),

    // ─────────────────────────────────────────────────────────
    // Results & Detail Modal
    // ─────────────────────────────────────────────────────────
    /// Move the results selection (background scroll)
    SelectNextEntry,
    SelectPreviousEntry,
    /// Open detail for a class
    ShowDetail { class_name: String },
    /// Open detail for the selected results entry
    ShowSelectedDetail,
    /// Any modal close trigger
    CloseDetail,
    /// Scroll modal content
    ModalScrollUp,
    ModalScrollDown,
    ModalPageUp,
    ModalPageDown,
    ModalScrollToTop,

    /// Dismiss the alert dialog
    DismissAlert,
}
