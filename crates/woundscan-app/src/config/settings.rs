//! Settings parser for config.toml

use super::types::{CatalogSourceKind, Settings};
use std::path::{Path, PathBuf};
use woundscan_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "wound-scan";

/// Default settings file, `<config_dir>/wound-scan/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `explicit` or the default location.
///
/// A missing or unparseable file yields defaults; problems are logged,
/// never fatal.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let config_path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => {
            debug!("No config directory on this platform, using defaults");
            return Settings::default();
        }
    };

    if !config_path.exists() {
        if explicit.is_some() {
            warn!("Config file {:?} does not exist, using defaults", config_path);
        } else {
            debug!("No config file at {:?}, using defaults", config_path);
        }
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config to `path` unless one already exists.
///
/// Returns whether a file was written.
pub fn init_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    let default_content = r#"# Wound Scan Configuration

[server]
# Base URL of the wound detection service
base_url = "http://localhost:5000"
detect_path = "/detect"
request_timeout_secs = 60

[catalog]
# "http" fetches url_path from the server, "file" reads path from disk
source = "http"
url_path = "/static/info/wound_info.json"
# path = "/path/to/wound_info.json"
timeout_secs = 15

[ui]
mouse = true
show_preview_uri = false
"#;

    std::fs::write(path, default_content)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", path, e)))?;
    info!("Wrote default config to {:?}", path);
    Ok(true)
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub server: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl SettingsOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(server) = &self.server {
            settings.server.base_url = server.clone();
        }
        if let Some(path) = &self.catalog_path {
            settings.catalog.source = CatalogSourceKind::File;
            settings.catalog.path = Some(path.clone());
        }
        if let Some(secs) = self.timeout_secs {
            settings.server.request_timeout_secs = secs;
        }
    }
}
