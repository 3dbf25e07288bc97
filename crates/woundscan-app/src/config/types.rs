//! Configuration types for Wound Scan
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ServerSettings`, `CatalogSettings`, `UiSettings` - Its sections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use woundscan_client::{
    CatalogSource, ServerEndpoints, DEFAULT_CATALOG_PATH, DEFAULT_DETECT_PATH,
};
use woundscan_core::prelude::*;

/// Global application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Detection service location
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the detection service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the detection endpoint, relative to `base_url`
    #[serde(default = "default_detect_path")]
    pub detect_path: String,

    /// Deadline for one detection round trip
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            detect_path: default_detect_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_detect_path() -> String {
    DEFAULT_DETECT_PATH.to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Where the wound info catalog comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    /// Fetched from the detection service
    #[default]
    Http,
    /// Read from a local JSON file
    File,
}

/// Wound info catalog settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub source: CatalogSourceKind,

    /// Local catalog file, required when `source = "file"`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Catalog path on the server, relative to `server.base_url`
    #[serde(default = "default_catalog_url_path")]
    pub url_path: String,

    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: CatalogSourceKind::default(),
            path: None,
            url_path: default_catalog_url_path(),
            timeout_secs: default_catalog_timeout_secs(),
        }
    }
}

fn default_catalog_url_path() -> String {
    DEFAULT_CATALOG_PATH.to_string()
}

fn default_catalog_timeout_secs() -> u64 {
    15
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Capture mouse clicks (backdrop click, buttons)
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Show the start of the preview data URI under the staged file
    #[serde(default)]
    pub show_preview_uri: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            mouse: true,
            show_preview_uri: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Resolve the service endpoints
    pub fn endpoints(&self) -> Result<ServerEndpoints> {
        ServerEndpoints::new(
            &self.server.base_url,
            &self.server.detect_path,
            &self.catalog.url_path,
        )
    }

    /// Resolve the catalog source against `endpoints`
    pub fn catalog_source(&self, endpoints: &ServerEndpoints) -> Result<CatalogSource> {
        match self.catalog.source {
            CatalogSourceKind::Http => Ok(CatalogSource::Http(endpoints.catalog_url().clone())),
            CatalogSourceKind::File => self
                .catalog
                .path
                .clone()
                .map(CatalogSource::File)
                .ok_or_else(|| {
                    Error::config_invalid("catalog.source = \"file\" requires catalog.path")
                }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs.max(1))
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs.max(1))
    }
}
