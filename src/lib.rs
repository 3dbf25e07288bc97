//! Wound Scan Library
//!
//! Binary-level glue for the `woundscan` command: the headless NDJSON mode.
//! The interactive client lives in `woundscan-tui`.

pub mod headless;

// Re-export main entry points
pub use headless::{run_headless, HeadlessOutcome};
pub use woundscan_tui::run;
