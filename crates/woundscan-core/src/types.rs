//! Detection domain types shared by the client, app and TUI crates
//!
//! These are the canonical shapes. Wire-format quirks (the legacy
//! `detection` key, missing fields) are normalized by `woundscan-client`
//! before anything here is constructed.

use serde::{Deserialize, Serialize};

/// Largest payload the file selector will stage (16 MiB, inclusive)
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// MIME types the file selector accepts
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Standard fallback text recommending professional care.
///
/// Shown when a scan finds no wounds and when a detected class has no
/// reference data in the catalog.
pub const ADVISORY_MESSAGE: &str = "The patient should promptly receive further examination \
and treatment at a healthcare facility from qualified medical personnel.";

/// Class label used when a detection arrives without one
pub const UNKNOWN_CLASS: &str = "Unknown";

/// The single user-selected image held in memory pending submission
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Original file name (sent as the multipart part's file name)
    pub file_name: String,
    /// MIME type, one of [`ALLOWED_MIME_TYPES`]
    pub mime_type: String,
    /// Raw image bytes
    pub raw_bytes: Vec<u8>,
}

impl StagedFile {
    pub fn size_bytes(&self) -> u64 {
        self.raw_bytes.len() as u64
    }
}

// Raw bytes are elided so log lines and test failures stay readable.
impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}

/// One identified wound instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Wound class label (e.g. "Laceration")
    pub class_name: String,
    /// Model confidence in `[0, 1]`; `None` when the server omitted it
    pub confidence: Option<f64>,
    /// Bounding box coordinates (normally 4); `None` when omitted
    pub bounding_box: Option<Vec<f64>>,
}

impl Detection {
    pub fn new(class_name: impl Into<String>, confidence: f64, bounding_box: Vec<f64>) -> Self {
        Self {
            class_name: class_name.into(),
            confidence: Some(confidence),
            bounding_box: Some(bounding_box),
        }
    }

    /// Confidence as a whole percentage, rounding half up. Missing → 0.
    pub fn confidence_percent(&self) -> i64 {
        let value = self.confidence.unwrap_or(0.0) * 100.0;
        // `as` saturates and maps NaN to 0
        (value + 0.5).floor() as i64
    }

    /// Bounding box as `"x1, y1, x2, y2"`, or `"N/A"` unless exactly four
    /// coordinates are present
    pub fn position_label(&self) -> String {
        match &self.bounding_box {
            Some(coords) if coords.len() == 4 => coords
                .iter()
                .map(|c| format_coordinate(*c))
                .collect::<Vec<_>>()
                .join(", "),
            _ => "N/A".to_string(),
        }
    }
}

/// Canonical detection response, produced once per successful request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Annotated result image, as returned by the server (usually a path)
    pub image_url: Option<String>,
    /// Wound count reported by the server
    pub total_wounds: u64,
    /// Detections in server order
    pub detections: Vec<Detection>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Format a coordinate the way a browser prints numbers: integral values
/// without a fractional part.
fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format a byte count for display.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
