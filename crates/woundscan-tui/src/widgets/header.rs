//! Main header: app title and the detection server in use

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use woundscan_app::state::AppState;

use crate::theme::styles;

pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn server_span(&self) -> Span<'static> {
        match &self.state.endpoints {
            Some(endpoints) => Span::styled(
                format!("Server {} ", endpoints.base()),
                styles::text_secondary(),
            ),
            None => Span::styled(
                format!("Invalid server URL {} ", self.state.settings.server.base_url),
                styles::status_red(),
            ),
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        let title = Line::from(vec![
            Span::styled(" ✚ Wound Scan", styles::accent_bold()),
            Span::styled("  first-aid wound detection", styles::text_muted()),
        ]);
        Paragraph::new(title).render(inner, buf);

        Paragraph::new(Line::from(self.server_span()))
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use woundscan_app::config::Settings;

    #[test]
    fn test_header_shows_title_and_server() {
        let mut term = TestTerminal::new();
        let state = AppState::new();
        term.render_widget(MainHeader::new(&state), term.area());

        assert!(term.buffer_contains("Wound Scan"));
        assert!(term.buffer_contains("Server http://localhost:5000/"));
    }

    #[test]
    fn test_header_flags_bad_server_url() {
        let mut term = TestTerminal::new();
        let mut settings = Settings::default();
        settings.server.base_url = "not a url".to_string();
        let state = AppState::with_settings(settings);
        term.render_widget(MainHeader::new(&state), term.area());

        assert!(term.buffer_contains("Invalid server URL not a url"));
    }
}
