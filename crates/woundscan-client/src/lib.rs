//! # woundscan-client - Detection Service Plumbing
//!
//! Talks to the remote wound-detection service and loads the static wound
//! info catalog. Everything leaving this crate is already in the canonical
//! shapes from [`woundscan_core`]; wire-format quirks stop here.
//!
//! ## Public API
//!
//! ### Endpoints
//! - [`ServerEndpoints`] - Base URL plus the detect/catalog paths, and result-image resolution
//!
//! ### Detection
//! - [`DetectionClient`] - Single-attempt multipart upload to `POST /detect`
//!
//! ### Wire Format
//! - [`parse_detection_response()`] - Normalize a detection response body
//!
//! ### Catalog
//! - [`CatalogSource`] - Where the catalog comes from (HTTP or a local file)
//! - [`fetch_catalog()`] - Fetch and parse the catalog
//! - [`parse_catalog()`] - Parse catalog JSON, skipping malformed entries

pub mod catalog;
pub mod detection;
pub mod endpoints;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod wire;

// Public API re-exports
pub use catalog::{fetch_catalog, parse_catalog, CatalogSource, WoundCatalogMap};
pub use detection::{DetectionClient, DEFAULT_DETECT_TIMEOUT};
pub use endpoints::{ServerEndpoints, DEFAULT_CATALOG_PATH, DEFAULT_DETECT_PATH};
pub use wire::parse_detection_response;
