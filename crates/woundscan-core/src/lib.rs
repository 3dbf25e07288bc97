//! # woundscan-core - Core Domain Types
//!
//! Foundation crate for Wound Scan. Provides domain types, the error taxonomy,
//! and logging initialization.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Detection Types (`types`)
//! - [`StagedFile`] - The single user-selected image held in memory pending submission
//! - [`DetectionResult`] - Canonical detection response (image URL, count, detections)
//! - [`Detection`] - One identified wound with class, confidence and bounding box
//!
//! ### Reference Data (`wound_info`)
//! - [`WoundInfo`] - First-aid reference content for one wound class
//! - [`TreatmentStep`], [`Tip`], [`Tips`] - Structured pieces of a [`WoundInfo`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Application error enum with `fatal` vs `recoverable` classification
//! - [`ValidationError`], [`DetectionError`], [`CatalogLoadError`] - Domain failures
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use woundscan_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;
pub mod wound_info;

/// Prelude for common imports used throughout all Wound Scan crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{CatalogLoadError, DetectionError, Error, Result, ResultExt, ValidationError};
pub use types::{
    format_bytes, Detection, DetectionResult, StagedFile, ADVISORY_MESSAGE, ALLOWED_MIME_TYPES,
    MAX_UPLOAD_BYTES, UNKNOWN_CLASS,
};
pub use wound_info::{Tip, Tips, TreatmentStep, WoundInfo};
