//! Service endpoint resolution

use url::Url;
use woundscan_core::prelude::*;

/// Default path of the detection endpoint
pub const DEFAULT_DETECT_PATH: &str = "/detect";

/// Default path of the static wound info catalog
pub const DEFAULT_CATALOG_PATH: &str = "/static/info/wound_info.json";

/// Resolved URLs for the detection service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoints {
    base: Url,
    detect: Url,
    catalog: Url,
}

impl ServerEndpoints {
    /// Build endpoints from a base URL and the two service paths.
    ///
    /// Paths are resolved relative to the base, so a base of
    /// `http://host/wounds/` maps `/detect` to `http://host/wounds/detect`.
    pub fn new(base_url: &str, detect_path: &str, catalog_path: &str) -> Result<Self> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|e| Error::config_invalid(format!("server base_url '{}': {}", base_url, e)))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config_invalid(format!(
                "server base_url must be http or https, got '{}'",
                base.scheme()
            )));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let detect = join_relative(&base, detect_path)?;
        let catalog = join_relative(&base, catalog_path)?;

        Ok(Self {
            base,
            detect,
            catalog,
        })
    }

    /// Endpoints for a base URL using the default service paths
    pub fn with_defaults(base_url: &str) -> Result<Self> {
        Self::new(base_url, DEFAULT_DETECT_PATH, DEFAULT_CATALOG_PATH)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn detect_url(&self) -> &Url {
        &self.detect
    }

    pub fn catalog_url(&self) -> &Url {
        &self.catalog
    }

    /// Resolve an `image_url` from a detection response the way a browser
    /// would: root-relative paths resolve against the server origin,
    /// absolute URLs pass through.
    pub fn resolve_asset(&self, image_url: &str) -> Option<Url> {
        if image_url.trim().is_empty() {
            return None;
        }
        self.base.join(image_url).ok()
    }
}

fn join_relative(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::config_invalid(format!("endpoint path '{}': {}", path, e)))
}
