//! Wound detail modal
//!
//! Drawn over a dimmed backdrop. Content is pre-wrapped to the modal width
//! so the scroll limit reported back to the presenter is exact.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use woundscan_app::detail_modal::{
    OpenModal, SectionKind, TipsSection, TreatmentSection, NO_TIPS, NO_TREATMENT_DATA,
};
use woundscan_app::DetailView;

use super::modal_overlay::{centered_rect, draw_backdrop};
use super::text::wrap;
use crate::theme::styles;

/// Label of the close button on the top border
pub const CLOSE_LABEL: &str = "[ Close ]";

const MIN_WIDTH: u16 = 40;
const MAX_WIDTH: u16 = 90;
const MIN_HEIGHT: u16 = 10;

/// Indent for wrapped bullet and explanation lines
const INDENT: &str = "   ";

/// Modal frame for a given screen
pub fn modal_rect(screen: Rect) -> Rect {
    let width = (screen.width.saturating_mul(4) / 5).clamp(MIN_WIDTH.min(screen.width), MAX_WIDTH);
    let height = (screen.height.saturating_mul(4) / 5).max(MIN_HEIGHT.min(screen.height));
    centered_rect(width, height, screen)
}

/// Close button, sitting on the top border near the right corner
pub fn close_button_rect(modal: Rect) -> Rect {
    let width = CLOSE_LABEL.len() as u16;
    Rect::new(
        modal.right().saturating_sub(width + 2).max(modal.x),
        modal.y,
        width.min(modal.width),
        1,
    )
}

/// Scrollable text area: inside the border, above the hint row
pub fn content_area(modal: Rect) -> Rect {
    let inner = inner_area(modal);
    Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1))
}

fn inner_area(modal: Rect) -> Rect {
    Rect::new(
        modal.x.saturating_add(1),
        modal.y.saturating_add(1),
        modal.width.saturating_sub(2),
        modal.height.saturating_sub(2),
    )
}

/// Largest scroll offset for `view` on `screen`
pub fn max_scroll(view: &DetailView, screen: Rect) -> u16 {
    let content = content_area(modal_rect(screen));
    let total = content_lines(view, content.width).len();
    u16::try_from(total.saturating_sub(content.height as usize)).unwrap_or(u16::MAX)
}

fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    width: u16,
    style: ratatui::style::Style,
) {
    for line in wrap(text, width, INDENT) {
        lines.push(Line::from(Span::styled(line, style)));
    }
}

fn push_bullets(lines: &mut Vec<Line<'static>>, items: Option<&[String]>, width: u16) {
    for item in items.unwrap_or_default() {
        push_wrapped(lines, &format!(" • {}", item), width, styles::text_primary());
    }
}

/// Every visible section as display lines, wrapped to `width`
pub fn content_lines(view: &DetailView, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, section) in view.visible_sections().into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            section.heading(),
            styles::accent_bold(),
        )));

        match section {
            SectionKind::Symptoms => push_bullets(&mut lines, view.symptoms(), width),
            SectionKind::SeekCare => push_bullets(&mut lines, view.seek_care(), width),
            SectionKind::HealingTime => push_bullets(&mut lines, view.healing_time(), width),
            SectionKind::Avoid => push_bullets(&mut lines, view.avoid(), width),

            SectionKind::Treatment => match view.treatment() {
                TreatmentSection::Steps(rows) => {
                    for row in rows {
                        push_wrapped(&mut lines, &row.heading, width, styles::text_bright_bold());
                        push_wrapped(
                            &mut lines,
                            &format!("{}{}", INDENT, row.explanation),
                            width,
                            styles::text_secondary(),
                        );
                    }
                }
                TreatmentSection::NoData => {
                    push_wrapped(&mut lines, NO_TREATMENT_DATA, width, styles::text_muted())
                }
            },

            SectionKind::Tips => match view.tips() {
                TipsSection::List(tips) => {
                    for tip in tips {
                        push_wrapped(
                            &mut lines,
                            &format!(" • {}", tip.label),
                            width,
                            styles::text_bright_bold(),
                        );
                        push_wrapped(
                            &mut lines,
                            &format!("{}{}", INDENT, tip.explanation),
                            width,
                            styles::text_secondary(),
                        );
                    }
                }
                TipsSection::Text(text) => {
                    push_wrapped(&mut lines, text, width, styles::text_primary())
                }
                TipsSection::Fallback => push_wrapped(&mut lines, NO_TIPS, width, styles::text_muted()),
            },
        }
    }

    lines
}

pub struct DetailModal<'a> {
    open: &'a OpenModal,
}

impl<'a> DetailModal<'a> {
    pub fn new(open: &'a OpenModal) -> Self {
        Self { open }
    }

    fn hint_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" close  ", styles::text_muted()),
            Span::styled("↑↓", styles::keybinding()),
            Span::styled(" scroll  ", styles::text_muted()),
            Span::styled("PgUp/PgDn", styles::keybinding()),
            Span::styled(" page", styles::text_muted()),
        ];
        if self.open.max_scroll > 0 {
            spans.push(Span::styled(
                format!("  {}/{}", self.open.scroll, self.open.max_scroll),
                styles::text_secondary(),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for DetailModal<'_> {
    /// `area` is the whole screen; the modal centers itself
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_rect(area);
        draw_backdrop(buf, area, modal);

        let view = &self.open.view;
        let title = if view.title() == view.class_name() {
            format!(" {} ", view.title())
        } else {
            format!(" {} · {} ", view.title(), view.class_name())
        };
        styles::modal_block(&title, styles::border_active()).render(modal, buf);

        let content = content_area(modal);
        Paragraph::new(content_lines(view, content.width))
            .scroll((self.open.scroll, 0))
            .render(content, buf);

        let inner = inner_area(modal);
        let hint_row = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        self.hint_line().render(hint_row, buf);

        let close = close_button_rect(modal);
        buf.set_string(close.x, close.y, CLOSE_LABEL, styles::status_red());
    }
}
