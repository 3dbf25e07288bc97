//! Headless mode - JSON event output for scripting and tests
//!
//! Runs a single detection without the TUI and reports progress on stdout
//! as NDJSON (newline-delimited JSON), one event per line. Each event has an
//! "event" field naming its type, plus event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"file_staged","file_name":"knee.jpg","mime_type":"image/jpeg","size_bytes":48213,"width":640,"height":480,"timestamp":1704700001000}
//! {"event":"detection_started","file_name":"knee.jpg","endpoint":"http://localhost:5000/detect","timestamp":1704700001002}
//! {"event":"catalog_loaded","classes":6,"timestamp":1704700001040}
//! {"event":"detection_completed","total_wounds":1,"image_url":"http://localhost:5000/static/results/knee.jpg","entries":[{"index":1,"class_name":"Laceration","confidence":"87%","position":"10, 20, 30, 40","has_reference":true}],"advisory":null,"timestamp":1704700002300}
//! ```

pub mod runner;

pub use runner::{run_headless, HeadlessOutcome};

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;
use woundscan_app::RenderedView;
use woundscan_app::RenderedEntry;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The image passed validation and is staged
    FileStaged {
        file_name: String,
        mime_type: String,
        size_bytes: u64,
        width: Option<u32>,
        height: Option<u32>,
        timestamp: i64,
    },

    /// The image was rejected (type or size)
    ValidationFailed {
        file_name: String,
        message: String,
        timestamp: i64,
    },

    /// The upload was sent
    DetectionStarted {
        file_name: String,
        endpoint: String,
        timestamp: i64,
    },

    /// The server answered with a result
    DetectionCompleted {
        total_wounds: u64,
        image_url: Option<String>,
        entries: Vec<RenderedEntry>,
        advisory: Option<String>,
        timestamp: i64,
    },

    /// The request failed (network, server or timeout)
    DetectionFailed { message: String, timestamp: i64 },

    /// The wound info catalog is available
    CatalogLoaded { classes: usize, timestamp: i64 },

    /// The catalog could not be loaded; details fall back to the advisory
    CatalogFailed { message: String, timestamp: i64 },

    /// Any other failure
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn file_staged(
        file_name: &str,
        mime_type: &str,
        size_bytes: u64,
        dimensions: Option<(u32, u32)>,
    ) -> Self {
        Self::FileStaged {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
            timestamp: Self::now(),
        }
    }

    pub fn validation_failed(file_name: &str, message: String) -> Self {
        Self::ValidationFailed {
            file_name: file_name.to_string(),
            message,
            timestamp: Self::now(),
        }
    }

    pub fn detection_started(file_name: &str, endpoint: &str) -> Self {
        Self::DetectionStarted {
            file_name: file_name.to_string(),
            endpoint: endpoint.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn detection_completed(view: &RenderedView) -> Self {
        Self::DetectionCompleted {
            total_wounds: view.total_wounds,
            image_url: view.image_url.clone(),
            entries: view.entries.clone(),
            advisory: view.advisory.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn detection_failed(message: String) -> Self {
        Self::DetectionFailed {
            message,
            timestamp: Self::now(),
        }
    }

    pub fn catalog_loaded(classes: usize) -> Self {
        Self::CatalogLoaded {
            classes,
            timestamp: Self::now(),
        }
    }

    pub fn catalog_failed(message: String) -> Self {
        Self::CatalogFailed {
            message,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}
