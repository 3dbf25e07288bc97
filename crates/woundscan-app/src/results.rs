//! Turns a detection result into display entries

use serde::Serialize;
use woundscan_client::ServerEndpoints;
use woundscan_core::{DetectionResult, ADVISORY_MESSAGE};

use crate::catalog::WoundInfoCatalog;

/// One row of the results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    /// 1-based position in server order
    pub index: usize,
    pub class_name: String,
    /// e.g. `"87%"`
    pub confidence: String,
    /// e.g. `"10, 20, 30, 40"` or `"N/A"`
    pub position: String,
    /// Whether the catalog has reference data for this class
    pub has_reference: bool,
}

impl RenderedEntry {
    pub fn label(&self) -> String {
        format!("#{}", self.index)
    }
}

/// Everything the results panel shows for one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    /// Result image, resolved against the server when possible
    pub image_url: Option<String>,
    pub total_wounds: u64,
    pub entries: Vec<RenderedEntry>,
    /// Set exactly when there are no entries
    pub advisory: Option<String>,
}

impl RenderedView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> String {
        match self.total_wounds {
            1 => "1 wound detected".to_string(),
            n => format!("{} wounds detected", n),
        }
    }

    /// Recompute `has_reference` once the catalog settles
    pub fn refresh_references(&mut self, catalog: &WoundInfoCatalog) {
        for entry in &mut self.entries {
            entry.has_reference = catalog.contains(&entry.class_name);
        }
    }
}

/// Build the view for `result`.
///
/// Unknown classes are fine here; they simply render without reference
/// data and the detail action reports the advisory instead.
pub fn render(
    result: &DetectionResult,
    catalog: &WoundInfoCatalog,
    endpoints: Option<&ServerEndpoints>,
) -> RenderedView {
    let entries: Vec<RenderedEntry> = result
        .detections
        .iter()
        .enumerate()
        .map(|(i, d)| RenderedEntry {
            index: i + 1,
            class_name: d.class_name.clone(),
            confidence: format!("{}%", d.confidence_percent()),
            position: d.position_label(),
            has_reference: catalog.contains(&d.class_name),
        })
        .collect();

    let image_url = result.image_url.as_deref().map(|raw| {
        endpoints
            .and_then(|e| e.resolve_asset(raw))
            .map(|u| u.to_string())
            .unwrap_or_else(|| raw.to_string())
    });

    let advisory = entries.is_empty().then(|| ADVISORY_MESSAGE.to_string());

    RenderedView {
        image_url,
        total_wounds: result.total_wounds,
        entries,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use woundscan_client::WoundCatalogMap;
    use woundscan_core::{Detection, WoundInfo};

    fn result_with(detections: Vec<Detection>) -> DetectionResult {
        DetectionResult {
            image_url: Some("/static/results/result_a.jpg".to_string()),
            total_wounds: detections.len() as u64,
            detections,
        }
    }

    #[test]
    fn test_laceration_entry() {
        let result = result_with(vec![Detection::new(
            "Laceration",
            0.873,
            vec![10.0, 20.0, 30.0, 40.0],
        )]);
        let view = render(&result, &WoundInfoCatalog::new(), None);

        assert_eq!(view.entries.len(), 1);
        let entry = &view.entries[0];
        assert_eq!(entry.label(), "#1");
        assert_eq!(entry.class_name, "Laceration");
        assert_eq!(entry.confidence, "87%");
        assert_eq!(entry.position, "10, 20, 30, 40");
        assert!(!entry.has_reference);
        assert!(view.advisory.is_none());
    }

    #[test]
    fn test_empty_detections_yield_single_advisory() {
        let view = render(&result_with(vec![]), &WoundInfoCatalog::new(), None);

        assert!(view.entries.is_empty());
        assert_eq!(view.advisory.as_deref(), Some(ADVISORY_MESSAGE));
    }

    #[test]
    fn test_entries_keep_source_order() {
        let result = result_with(vec![
            Detection::new("Burn", 0.4, vec![]),
            Detection::new("Abrasion", 0.9, vec![]),
        ]);
        let view = render(&result, &WoundInfoCatalog::new(), None);

        let classes: Vec<_> = view.entries.iter().map(|e| e.class_name.as_str()).collect();
        assert_eq!(classes, vec!["Burn", "Abrasion"]);
        assert_eq!(view.entries[1].index, 2);
    }

    #[test]
    fn test_missing_confidence_and_bbox() {
        let result = result_with(vec![Detection {
            class_name: "Bruise".to_string(),
            confidence: None,
            bounding_box: None,
        }]);
        let view = render(&result, &WoundInfoCatalog::new(), None);

        assert_eq!(view.entries[0].confidence, "0%");
        assert_eq!(view.entries[0].position, "N/A");
    }

    #[test]
    fn test_reference_flag_and_refresh() {
        let result = result_with(vec![Detection::new("Laceration", 0.5, vec![])]);
        let mut view = render(&result, &WoundInfoCatalog::new(), None);
        assert!(!view.entries[0].has_reference);

        let mut map = WoundCatalogMap::new();
        map.insert("Laceration".to_string(), WoundInfo::default());
        view.refresh_references(&WoundInfoCatalog::loaded(map));

        assert!(view.entries[0].has_reference);
    }

    #[test]
    fn test_image_url_resolved_against_server() {
        let endpoints = ServerEndpoints::with_defaults("http://localhost:5000").unwrap();
        let view = render(
            &result_with(vec![]),
            &WoundInfoCatalog::new(),
            Some(&endpoints),
        );
        assert_eq!(
            view.image_url.as_deref(),
            Some("http://localhost:5000/static/results/result_a.jpg")
        );
    }

    #[test]
    fn test_summary() {
        let mut view = render(&result_with(vec![]), &WoundInfoCatalog::new(), None);
        assert_eq!(view.summary(), "0 wounds detected");
        view.total_wounds = 1;
        assert_eq!(view.summary(), "1 wound detected");
    }
}
