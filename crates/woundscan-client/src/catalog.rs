//! Wound info catalog loading
//!
//! The catalog is a single JSON object mapping a wound class name to its
//! [`WoundInfo`]. It is served as a static file by the detection service,
//! or read from disk for offline use.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tokio::time::timeout;
use url::Url;
use woundscan_core::prelude::*;
use woundscan_core::{CatalogLoadError, WoundInfo};

/// Class name to reference data
pub type WoundCatalogMap = HashMap<String, WoundInfo>;

/// Where the catalog is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Http(Url),
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Http(url) => write!(f, "{}", url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch and parse the catalog from `source` within `deadline`.
pub async fn fetch_catalog(
    source: &CatalogSource,
    deadline: Duration,
) -> std::result::Result<WoundCatalogMap, CatalogLoadError> {
    debug!("Loading wound catalog from {}", source);

    let text = timeout(deadline, read_source(source))
        .await
        .map_err(|_| {
            CatalogLoadError::fetch(
                source.to_string(),
                format!("timed out after {}s", deadline.as_secs()),
            )
        })??;

    let catalog = parse_catalog(&text)?;
    info!("Loaded {} wound catalog entries from {}", catalog.len(), source);
    Ok(catalog)
}

async fn read_source(source: &CatalogSource) -> std::result::Result<String, CatalogLoadError> {
    let fetch_err = |message: String| CatalogLoadError::fetch(source.to_string(), message);

    match source {
        CatalogSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| fetch_err(e.to_string())),
        CatalogSource::Http(url) => {
            let response = reqwest::get(url.clone())
                .await
                .map_err(|e| fetch_err(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(fetch_err(format!("HTTP {}", status)));
            }

            response.text().await.map_err(|e| fetch_err(e.to_string()))
        }
    }
}

/// Parse catalog JSON.
///
/// The top level must be an object. Entries that are not objects are
/// skipped with a warning so one bad class does not empty the catalog.
pub fn parse_catalog(text: &str) -> std::result::Result<WoundCatalogMap, CatalogLoadError> {
    let entries: HashMap<String, Value> =
        serde_json::from_str(text).map_err(|e| CatalogLoadError::parse(e.to_string()))?;

    let mut catalog = WoundCatalogMap::with_capacity(entries.len());
    for (class_name, value) in entries {
        if !value.is_object() {
            warn!("Skipping catalog entry '{}': not an object", class_name);
            continue;
        }
        match serde_json::from_value::<WoundInfo>(value) {
            Ok(info) => {
                catalog.insert(class_name, info);
            }
            Err(e) => warn!("Skipping catalog entry '{}': {}", class_name, e),
        }
    }

    Ok(catalog)
}
