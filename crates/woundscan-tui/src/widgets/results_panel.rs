//! Results panel: summary line, result image URL and the wound list

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use woundscan_app::state::ResultsState;
use woundscan_app::RenderedEntry;

use crate::theme::styles;

/// Rows above the list: summary, image URL, spacer
const HEADER_ROWS: u16 = 3;

pub struct ResultsPanel<'a> {
    results: &'a ResultsState,
    /// File name of the image being analyzed, while a request is in flight
    detecting: Option<&'a str>,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(results: &'a ResultsState) -> Self {
        Self {
            results,
            detecting: None,
        }
    }

    pub fn detecting(mut self, file_name: Option<&'a str>) -> Self {
        self.detecting = file_name;
        self
    }

    fn block() -> Block<'static> {
        styles::glass_block(false).title(Span::styled(" Results ", styles::accent_bold()))
    }

    /// Area holding the clickable wound rows for a panel drawn at `area`
    pub fn list_area(area: Rect) -> Rect {
        let inner = Self::block().inner(area);
        Rect::new(
            inner.x,
            inner.y.saturating_add(HEADER_ROWS),
            inner.width,
            inner.height.saturating_sub(HEADER_ROWS),
        )
    }

    /// Screen rows of the visible entries, paired with their indices
    pub fn visible_rows(results: &ResultsState, list: Rect) -> Vec<(Rect, usize)> {
        let count = results.entry_count();
        (0..list.height)
            .map(|row| (row, results.offset + row as usize))
            .take_while(|(_, index)| *index < count)
            .map(|(row, index)| (Rect::new(list.x, list.y + row, list.width, 1), index))
            .collect()
    }

    fn entry_line(entry: &RenderedEntry, selected: bool) -> Line<'static> {
        let reference = if entry.has_reference {
            Span::styled("details", styles::status_green())
        } else {
            Span::styled("no reference", styles::text_muted())
        };

        let line = Line::from(vec![
            Span::styled(format!("{:<4}", entry.label()), styles::text_muted()),
            Span::styled(format!("{:<16}", entry.class_name), styles::text_bright_bold()),
            Span::styled(format!("{:>5}", entry.confidence), styles::accent()),
            Span::styled(format!("  [{}]  ", entry.position), styles::text_secondary()),
            reference,
        ]);

        if selected {
            line.style(styles::focused_selected())
        } else {
            line
        }
    }

    fn render_message(area: Rect, buf: &mut Buffer, lines: Vec<Line<'static>>) {
        Paragraph::new(lines)
            .block(Self::block())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(file_name) = self.detecting {
            Self::render_message(
                area,
                buf,
                vec![Line::from(Span::styled(
                    format!("Detecting wounds in {}...", file_name),
                    styles::status_yellow(),
                ))],
            );
            return;
        }

        let Some(view) = self.results.view.as_ref() else {
            Self::render_message(
                area,
                buf,
                vec![Line::from(Span::styled(
                    "No results yet. Open an image and press d to detect.",
                    styles::text_muted(),
                ))],
            );
            return;
        };

        if view.is_empty() {
            let mut lines = vec![
                Line::from(Span::styled(view.summary(), styles::text_bright_bold())),
                Line::from(""),
            ];
            if let Some(advisory) = &view.advisory {
                lines.push(Line::from(Span::styled(
                    advisory.clone(),
                    styles::status_blue(),
                )));
            }
            Self::render_message(area, buf, lines);
            return;
        }

        let block = Self::block();
        let inner = block.inner(area);
        block.render(area, buf);

        let image_line = match &view.image_url {
            Some(url) => Line::from(vec![
                Span::styled("Image ", styles::text_muted()),
                Span::styled(url.clone(), styles::text_secondary()),
            ]),
            None => Line::from(Span::styled("No result image", styles::text_muted())),
        };
        let header = vec![
            Line::from(Span::styled(view.summary(), styles::text_bright_bold())),
            image_line,
        ];
        let header_area = Rect::new(inner.x, inner.y, inner.width, HEADER_ROWS.min(inner.height));
        Paragraph::new(header).render(header_area, buf);

        let list = Self::list_area(area);
        for (row, index) in Self::visible_rows(self.results, list) {
            let entry = &view.entries[index];
            Self::entry_line(entry, index == self.results.selected).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use woundscan_app::RenderedView;

    fn entry(index: usize, class_name: &str, has_reference: bool) -> RenderedEntry {
        RenderedEntry {
            index,
            class_name: class_name.to_string(),
            confidence: "87%".to_string(),
            position: "10, 20, 30, 40".to_string(),
            has_reference,
        }
    }

    fn results_with(entries: Vec<RenderedEntry>) -> ResultsState {
        let advisory = entries
            .is_empty()
            .then(|| woundscan_core::ADVISORY_MESSAGE.to_string());
        ResultsState {
            view: Some(RenderedView {
                image_url: Some("http://localhost:5000/static/results/a.jpg".to_string()),
                total_wounds: entries.len() as u64,
                entries,
                advisory,
            }),
            selected: 0,
            offset: 0,
        }
    }

    #[test]
    fn test_no_results_placeholder() {
        let mut term = TestTerminal::new();
        let results = ResultsState::default();
        term.render_widget(ResultsPanel::new(&results), term.area());
        assert!(term.buffer_contains("No results yet"));
    }

    #[test]
    fn test_detecting_message() {
        let mut term = TestTerminal::new();
        let results = ResultsState::default();
        term.render_widget(
            ResultsPanel::new(&results).detecting(Some("arm.jpg")),
            term.area(),
        );
        assert!(term.buffer_contains("Detecting wounds in arm.jpg..."));
    }

    #[test]
    fn test_empty_result_shows_advisory() {
        let mut term = TestTerminal::new();
        let results = results_with(vec![]);
        term.render_widget(ResultsPanel::new(&results), term.area());

        assert!(term.buffer_contains("0 wounds detected"));
        assert!(term.buffer_contains("healthcare facility"));
    }

    #[test]
    fn test_entries_in_server_order() {
        let mut term = TestTerminal::new();
        let results = results_with(vec![
            entry(1, "Laceration", true),
            entry(2, "Burn", false),
        ]);
        term.render_widget(ResultsPanel::new(&results), term.area());

        assert!(term.buffer_contains("2 wounds detected"));
        assert!(term.buffer_contains("/static/results/a.jpg"));
        // Border + 3 header rows put the first entry on line 4
        assert!(term.line_contains(4, "#1"));
        assert!(term.line_contains(4, "Laceration"));
        assert!(term.line_contains(4, "87%"));
        assert!(term.line_contains(4, "details"));
        assert!(term.line_contains(5, "#2"));
        assert!(term.line_contains(5, "no reference"));
    }

    #[test]
    fn test_visible_rows_respect_offset() {
        let mut results = results_with((1..=5).map(|i| entry(i, "Burn", false)).collect());
        results.offset = 3;
        let rows = ResultsPanel::visible_rows(&results, Rect::new(1, 4, 30, 4));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], (Rect::new(1, 4, 30, 1), 3));
        assert_eq!(rows[1], (Rect::new(1, 5, 30, 1), 4));
    }

    #[test]
    fn test_list_area_below_header() {
        let list = ResultsPanel::list_area(Rect::new(0, 0, 40, 12));
        assert_eq!(list, Rect::new(1, 4, 38, 7));
    }
}
