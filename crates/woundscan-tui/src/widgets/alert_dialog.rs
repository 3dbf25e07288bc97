//! Blocking alert dialog (errors, advisories, validation messages)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use woundscan_app::alert::{AlertKind, AlertState};

use super::modal_overlay::{centered_rect, draw_backdrop};
use super::text::wrap;
use crate::theme::styles;

const DIALOG_WIDTH: u16 = 56;

pub struct AlertDialog<'a> {
    alert: &'a AlertState,
}

impl<'a> AlertDialog<'a> {
    pub fn new(alert: &'a AlertState) -> Self {
        Self { alert }
    }

    fn message_lines(&self, width: u16) -> Vec<Line<'static>> {
        self.alert
            .message
            .lines()
            .flat_map(|paragraph| wrap(paragraph, width, ""))
            .map(|line| Line::from(Span::styled(line, styles::text_primary())))
            .collect()
    }
}

impl Widget for AlertDialog<'_> {
    /// `area` is the whole screen; the dialog centers itself
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_width = DIALOG_WIDTH.min(area.width).saturating_sub(4);
        let mut lines = self.message_lines(text_width);
        lines.push(Line::from(""));
        lines.push(
            Line::from(vec![
                Span::styled("[Enter]", styles::keybinding()),
                Span::styled(" OK", styles::text_secondary()),
            ])
            .alignment(Alignment::Center),
        );

        // Border plus one row of padding above and below the text
        let height = lines.len() as u16 + 4;
        let dialog = centered_rect(DIALOG_WIDTH, height, area);
        draw_backdrop(buf, area, dialog);

        let border = match self.alert.kind {
            AlertKind::Error => styles::status_red(),
            AlertKind::Info => styles::status_blue(),
        };
        let title = format!(" {} ", self.alert.title);
        let block = styles::modal_block(&title, border);
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let text_area = Rect::new(
            inner.x.saturating_add(1),
            inner.y.saturating_add(1),
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(2),
        );
        Paragraph::new(lines).render(text_area, buf);
    }
}
