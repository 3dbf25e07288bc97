//! Status bar widget
//!
//! One line: the latest status message (or key hints for the current
//! mode) on the left, catalog state on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use woundscan_app::state::{AppState, UiMode};
use woundscan_app::CatalogState;

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.ui_mode {
            UiMode::Normal if self.state.results.entry_count() > 0 => &[
                ("↑↓", "select"),
                ("Enter", "details"),
                ("o", "open"),
                ("r", "reset"),
                ("q", "quit"),
            ],
            UiMode::Normal if self.state.file_selector.has_file() => &[
                ("d", "detect"),
                ("o", "open"),
                ("x", "remove"),
                ("q", "quit"),
            ],
            UiMode::Normal => &[("o", "open image"), ("q", "quit")],
            UiMode::PathInput => &[("Enter", "open"), ("Esc", "cancel")],
            UiMode::DetailModal => &[("Esc", "close"), ("↑↓", "scroll")],
            UiMode::Alert => &[("Enter", "dismiss")],
        }
    }

    fn left_line(&self) -> Line<'static> {
        if let Some(message) = &self.state.status_message {
            return Line::from(Span::styled(format!(" {}", message), styles::text_secondary()));
        }

        let mut spans = vec![Span::raw(" ")];
        for (key, action) in self.hints() {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        Line::from(spans)
    }

    fn catalog_style(&self) -> Style {
        match self.state.catalog.state() {
            CatalogState::NotLoaded => styles::status_yellow(),
            CatalogState::Loaded(_) => styles::status_green(),
            CatalogState::LoadFailed(_) => styles::status_red(),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.left_line()).render(area, buf);

        let catalog = Span::styled(
            format!("{} ", self.state.catalog.status_label()),
            self.catalog_style(),
        );
        Paragraph::new(Line::from(catalog))
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use woundscan_core::CatalogLoadError;

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::with_size(80, 1);
        term.render_widget(StatusBar::new(state), term.area());
        term
    }

    #[test]
    fn test_idle_hints_and_loading_catalog() {
        let state = AppState::new();
        let term = render(&state);

        assert!(term.buffer_contains("o open image"));
        assert!(term.buffer_contains("Catalog: loading"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let mut state = AppState::new();
        state.status_message = Some("Staged knee.png (2.0 KB)".to_string());
        let term = render(&state);

        assert!(term.buffer_contains("Staged knee.png"));
        assert!(!term.buffer_contains("open image"));
    }

    #[test]
    fn test_catalog_failure_shown() {
        let mut state = AppState::new();
        state
            .catalog
            .mark_failed(CatalogLoadError::parse("bad json".to_string()));
        let term = render(&state);

        assert!(term.buffer_contains("Catalog: unavailable"));
    }

    #[test]
    fn test_modal_hints() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::DetailModal;
        let term = render(&state);

        assert!(term.buffer_contains("Esc close"));
    }
}
