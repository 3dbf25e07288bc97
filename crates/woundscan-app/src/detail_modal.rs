//! Wound detail modal: view-model and open/close state
//!
//! [`DetailView`] is built once from a catalog entry when the modal opens.
//! Sections are typed so the renderer never has to re-inspect raw catalog
//! data to decide what to show.

use woundscan_core::prelude::*;
use woundscan_core::{Tip, Tips, TreatmentStep, WoundInfo, UNKNOWN_CLASS};

use crate::catalog::{CatalogLookup, WoundInfoCatalog};

/// Row shown when an entry has no treatment steps
pub const NO_TREATMENT_DATA: &str = "No treatment data";

/// Tips text shown when an entry has no usable tips
pub const NO_TIPS: &str = "No special tips.";

/// The six modal sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Symptoms,
    Treatment,
    SeekCare,
    HealingTime,
    Avoid,
    Tips,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Symptoms,
        SectionKind::Treatment,
        SectionKind::SeekCare,
        SectionKind::HealingTime,
        SectionKind::Avoid,
        SectionKind::Tips,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Symptoms => "Symptoms",
            SectionKind::Treatment => "First Aid",
            SectionKind::SeekCare => "When to Seek Medical Help",
            SectionKind::HealingTime => "Healing Time",
            SectionKind::Avoid => "Avoid",
            SectionKind::Tips => "Tips",
        }
    }
}

/// One treatment row: `"{n}. {step}"` with its explanation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentRow {
    pub heading: String,
    pub explanation: String,
}

/// Treatment is always shown; an entry without steps gets a placeholder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreatmentSection {
    Steps(Vec<TreatmentRow>),
    NoData,
}

impl TreatmentSection {
    fn from_steps(steps: Option<&[TreatmentStep]>) -> Self {
        match steps {
            Some(steps) if !steps.is_empty() => TreatmentSection::Steps(
                steps
                    .iter()
                    .enumerate()
                    .map(|(i, s)| TreatmentRow {
                        heading: format!("{}. {}", i + 1, s.step),
                        explanation: s.explanation.clone(),
                    })
                    .collect(),
            ),
            _ => TreatmentSection::NoData,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipsSection {
    List(Vec<Tip>),
    Text(String),
    Fallback,
}

impl TipsSection {
    fn from_tips(tips: Option<&Tips>) -> Self {
        match tips {
            Some(Tips::List(list)) if !list.is_empty() => TipsSection::List(list.clone()),
            Some(Tips::Text(text)) if !text.trim().is_empty() => TipsSection::Text(text.clone()),
            _ => TipsSection::Fallback,
        }
    }
}

/// Typed view-model for one wound class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    class_name: String,
    title: String,
    symptoms: Option<Vec<String>>,
    treatment: TreatmentSection,
    seek_care: Option<Vec<String>>,
    healing_time: Option<Vec<String>>,
    avoid: Option<Vec<String>>,
    tips: TipsSection,
}

fn non_empty(list: Option<&Vec<String>>) -> Option<Vec<String>> {
    list.filter(|l| !l.is_empty()).cloned()
}

impl DetailView {
    pub fn build(class_name: &str, info: &WoundInfo) -> Self {
        let title = info
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_CLASS)
            .to_string();

        Self {
            class_name: class_name.to_string(),
            title,
            symptoms: non_empty(info.symptoms.as_ref()),
            treatment: TreatmentSection::from_steps(info.treatment_steps.as_deref()),
            seek_care: non_empty(info.seek_care.as_ref()),
            healing_time: non_empty(info.healing_time.as_ref()),
            avoid: non_empty(info.avoid.as_ref()),
            tips: TipsSection::from_tips(info.tips.as_ref()),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn symptoms(&self) -> Option<&[String]> {
        self.symptoms.as_deref()
    }

    pub fn treatment(&self) -> &TreatmentSection {
        &self.treatment
    }

    pub fn seek_care(&self) -> Option<&[String]> {
        self.seek_care.as_deref()
    }

    pub fn healing_time(&self) -> Option<&[String]> {
        self.healing_time.as_deref()
    }

    pub fn avoid(&self) -> Option<&[String]> {
        self.avoid.as_deref()
    }

    pub fn tips(&self) -> &TipsSection {
        &self.tips
    }

    pub fn is_visible(&self, section: SectionKind) -> bool {
        match section {
            SectionKind::Symptoms => self.symptoms.is_some(),
            SectionKind::SeekCare => self.seek_care.is_some(),
            SectionKind::HealingTime => self.healing_time.is_some(),
            SectionKind::Avoid => self.avoid.is_some(),
            SectionKind::Treatment | SectionKind::Tips => true,
        }
    }

    pub fn visible_sections(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|s| self.is_visible(*s))
            .collect()
    }
}

/// An open modal and its content scroll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenModal {
    pub view: DetailView,
    pub scroll: u16,
    /// Largest useful scroll offset, reported by the renderer
    pub max_scroll: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

/// Outcome of [`DetailModalPresenter::show`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    Opened,
    /// No reference data; the caller shows the advisory instead
    Advisory,
}

#[derive(Debug, Default)]
pub struct DetailModalPresenter {
    state: ModalState,
}

impl DetailModalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn open(&self) -> Option<&OpenModal> {
        match &self.state {
            ModalState::Open(open) => Some(open),
            ModalState::Closed => None,
        }
    }

    pub fn open_mut(&mut self) -> Option<&mut OpenModal> {
        match &mut self.state {
            ModalState::Open(open) => Some(open),
            ModalState::Closed => None,
        }
    }

    pub fn view(&self) -> Option<&DetailView> {
        self.open().map(|o| &o.view)
    }

    /// Open the modal for `class_name`, or report that there is nothing to show.
    pub fn show(&mut self, class_name: &str, catalog: &WoundInfoCatalog) -> ShowOutcome {
        match catalog.lookup(class_name) {
            CatalogLookup::Found(info) => {
                debug!("Opening detail for {}", class_name);
                self.state = ModalState::Open(OpenModal {
                    view: DetailView::build(class_name, info),
                    scroll: 0,
                    max_scroll: 0,
                });
                ShowOutcome::Opened
            }
            CatalogLookup::Miss => {
                debug!("No reference data for {}", class_name);
                ShowOutcome::Advisory
            }
        }
    }

    /// Close the modal. Safe to call when already closed.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = ModalState::Closed;
        was_open
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if let Some(open) = self.open_mut() {
            open.scroll = open.scroll.saturating_sub(lines);
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        if let Some(open) = self.open_mut() {
            open.scroll = open.scroll.saturating_add(lines).min(open.max_scroll);
        }
    }

    pub fn scroll_to_top(&mut self) {
        if let Some(open) = self.open_mut() {
            open.scroll = 0;
        }
    }

    /// Record how far the content can scroll at the current size
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        if let Some(open) = self.open_mut() {
            open.max_scroll = max_scroll;
            open.scroll = open.scroll.min(max_scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use woundscan_client::WoundCatalogMap;

    fn full_info() -> WoundInfo {
        WoundInfo {
            name: Some("Luka Robek".to_string()),
            symptoms: Some(vec!["Tepi tidak rata".to_string()]),
            treatment_steps: Some(vec![
                TreatmentStep {
                    step: "Hentikan perdarahan".to_string(),
                    explanation: "Tekan luka".to_string(),
                },
                TreatmentStep {
                    step: "Bersihkan".to_string(),
                    explanation: "Air mengalir".to_string(),
                },
            ]),
            seek_care: Some(vec!["Luka dalam".to_string()]),
            healing_time: Some(vec!["1-2 minggu".to_string()]),
            avoid: Some(vec!["Meniup luka".to_string()]),
            tips: Some(Tips::List(vec![Tip {
                label: "Ganti perban".to_string(),
                explanation: "Setiap hari".to_string(),
            }])),
        }
    }

    fn catalog_with(class: &str, info: WoundInfo) -> WoundInfoCatalog {
        let mut map = WoundCatalogMap::new();
        map.insert(class.to_string(), info);
        WoundInfoCatalog::loaded(map)
    }

    #[test]
    fn test_full_entry_shows_all_sections() {
        let view = DetailView::build("Laceration", &full_info());

        assert_eq!(view.title(), "Luka Robek");
        assert_eq!(view.visible_sections(), SectionKind::ALL.to_vec());
        match view.treatment() {
            TreatmentSection::Steps(rows) => {
                assert_eq!(rows[0].heading, "1. Hentikan perdarahan");
                assert_eq!(rows[0].explanation, "Tekan luka");
                assert_eq!(rows[1].heading, "2. Bersihkan");
            }
            other => panic!("expected steps, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_lists_hide_sections() {
        let info = WoundInfo {
            name: Some("Burn".to_string()),
            symptoms: Some(vec![]),
            healing_time: Some(vec![]),
            ..Default::default()
        };
        let view = DetailView::build("Burn", &info);

        assert!(!view.is_visible(SectionKind::Symptoms));
        assert!(!view.is_visible(SectionKind::SeekCare));
        assert!(!view.is_visible(SectionKind::HealingTime));
        assert!(!view.is_visible(SectionKind::Avoid));
        assert_eq!(
            view.visible_sections(),
            vec![SectionKind::Treatment, SectionKind::Tips]
        );
    }

    #[test]
    fn test_missing_treatment_shows_placeholder() {
        let view = DetailView::build("Burn", &WoundInfo::default());
        assert_eq!(view.treatment(), &TreatmentSection::NoData);
        assert!(view.is_visible(SectionKind::Treatment));
    }

    #[test]
    fn test_tips_string_shown_verbatim() {
        let info = WoundInfo {
            tips: Some(Tips::Text("Cool under running water.".to_string())),
            ..Default::default()
        };
        let view = DetailView::build("Burn", &info);
        assert_eq!(
            view.tips(),
            &TipsSection::Text("Cool under running water.".to_string())
        );
    }

    #[test]
    fn test_tips_fallback() {
        let view = DetailView::build("Burn", &WoundInfo::default());
        assert_eq!(view.tips(), &TipsSection::Fallback);

        let info = WoundInfo {
            tips: Some(Tips::List(vec![])),
            ..Default::default()
        };
        assert_eq!(DetailView::build("Burn", &info).tips(), &TipsSection::Fallback);
    }

    #[test]
    fn test_title_falls_back_to_unknown() {
        let info = WoundInfo {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(DetailView::build("X", &info).title(), UNKNOWN_CLASS);
        assert_eq!(DetailView::build("X", &WoundInfo::default()).title(), UNKNOWN_CLASS);
    }

    #[test]
    fn test_show_on_unloaded_catalog_is_advisory() {
        let mut presenter = DetailModalPresenter::new();
        let outcome = presenter.show("Laceration", &WoundInfoCatalog::new());

        assert_eq!(outcome, ShowOutcome::Advisory);
        assert_eq!(presenter.state(), &ModalState::Closed);
    }

    #[test]
    fn test_show_and_close() {
        let catalog = catalog_with("Laceration", full_info());
        let mut presenter = DetailModalPresenter::new();

        assert_eq!(presenter.show("Laceration", &catalog), ShowOutcome::Opened);
        assert!(presenter.is_open());
        assert_eq!(presenter.view().unwrap().class_name(), "Laceration");

        assert!(presenter.close());
        assert!(!presenter.is_open());
        assert!(!presenter.close());
    }

    #[test]
    fn test_content_scroll_is_clamped() {
        let catalog = catalog_with("Laceration", full_info());
        let mut presenter = DetailModalPresenter::new();
        presenter.show("Laceration", &catalog);
        presenter.set_max_scroll(5);

        presenter.scroll_down(3);
        assert_eq!(presenter.open().unwrap().scroll, 3);
        presenter.scroll_down(10);
        assert_eq!(presenter.open().unwrap().scroll, 5);
        presenter.scroll_up(2);
        assert_eq!(presenter.open().unwrap().scroll, 3);

        presenter.set_max_scroll(1);
        assert_eq!(presenter.open().unwrap().scroll, 1);
    }

    #[test]
    fn test_reopen_resets_scroll() {
        let catalog = catalog_with("Laceration", full_info());
        let mut presenter = DetailModalPresenter::new();
        presenter.show("Laceration", &catalog);
        presenter.set_max_scroll(5);
        presenter.scroll_down(4);

        presenter.close();
        presenter.show("Laceration", &catalog);

        assert_eq!(presenter.open().unwrap().scroll, 0);
    }
}
