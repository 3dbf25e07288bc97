//! Read-through cache for wound reference data
//!
//! Populated at most once from a background load. Until then (and forever,
//! if the load fails) every lookup is a miss.

use woundscan_client::WoundCatalogMap;
use woundscan_core::prelude::*;
use woundscan_core::{CatalogLoadError, WoundInfo};

/// Load state of the catalog
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    NotLoaded,
    Loaded(WoundCatalogMap),
    LoadFailed(CatalogLoadError),
}

/// Result of a class lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogLookup<'a> {
    Found(&'a WoundInfo),
    Miss,
}

impl<'a> CatalogLookup<'a> {
    pub fn found(self) -> Option<&'a WoundInfo> {
        match self {
            CatalogLookup::Found(info) => Some(info),
            CatalogLookup::Miss => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct WoundInfoCatalog {
    state: CatalogState,
}

impl WoundInfoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog that is already loaded with `entries`
    pub fn loaded(entries: WoundCatalogMap) -> Self {
        Self {
            state: CatalogState::Loaded(entries),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Store a successful load. Returns false if the catalog already settled.
    pub fn mark_loaded(&mut self, entries: WoundCatalogMap) -> bool {
        if !matches!(self.state, CatalogState::NotLoaded) {
            warn!("Ignoring catalog load: catalog already settled");
            return false;
        }
        info!("Wound catalog ready ({} classes)", entries.len());
        self.state = CatalogState::Loaded(entries);
        true
    }

    /// Record a failed load. The catalog stays empty.
    pub fn mark_failed(&mut self, error: CatalogLoadError) -> bool {
        if !matches!(self.state, CatalogState::NotLoaded) {
            warn!("Ignoring catalog failure after settle: {}", error);
            return false;
        }
        error!("Wound catalog unavailable: {}", error);
        self.state = CatalogState::LoadFailed(error);
        true
    }

    pub fn lookup(&self, class_name: &str) -> CatalogLookup<'_> {
        match &self.state {
            CatalogState::Loaded(entries) => entries
                .get(class_name)
                .map(CatalogLookup::Found)
                .unwrap_or(CatalogLookup::Miss),
            CatalogState::NotLoaded | CatalogState::LoadFailed(_) => CatalogLookup::Miss,
        }
    }

    pub fn contains(&self, class_name: &str) -> bool {
        matches!(self.lookup(class_name), CatalogLookup::Found(_))
    }

    pub fn len(&self) -> usize {
        match &self.state {
            CatalogState::Loaded(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short label for the status bar
    pub fn status_label(&self) -> String {
        match &self.state {
            CatalogState::NotLoaded => "Catalog: loading".to_string(),
            CatalogState::Loaded(entries) => format!("Catalog: {} classes", entries.len()),
            CatalogState::LoadFailed(_) => "Catalog: unavailable".to_string(),
        }
    }
}
