//! Upload panel: the staged image and what can be done with it

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use woundscan_app::FileSelector;
use woundscan_core::{format_bytes, MAX_UPLOAD_BYTES};

use crate::theme::styles;

/// Longest data URI prefix shown before eliding
const URI_PREVIEW_CHARS: usize = 48;

pub struct UploadPanel<'a> {
    selector: &'a FileSelector,
    detecting: bool,
    show_preview_uri: bool,
}

impl<'a> UploadPanel<'a> {
    pub fn new(selector: &'a FileSelector) -> Self {
        Self {
            selector,
            detecting: false,
            show_preview_uri: false,
        }
    }

    pub fn detecting(mut self, detecting: bool) -> Self {
        self.detecting = detecting;
        self
    }

    pub fn show_preview_uri(mut self, show: bool) -> Self {
        self.show_preview_uri = show;
        self
    }

    fn empty_lines() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled("No image selected", styles::text_secondary())),
            Line::from(""),
            Line::from(vec![
                Span::styled("[o]", styles::keybinding()),
                Span::styled(" Open a JPEG or PNG image", styles::text_muted()),
            ]),
            Line::from(Span::styled(
                format!("    up to {}", format_bytes(MAX_UPLOAD_BYTES)),
                styles::text_muted(),
            )),
        ]
    }

    fn field(label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<9}", label), styles::text_muted()),
            Span::styled(value, styles::text_primary()),
        ])
    }

    fn staged_lines(&self) -> Vec<Line<'static>> {
        let Some(staged) = self.selector.staged() else {
            return Self::empty_lines();
        };

        let mut lines = vec![
            Self::field("File", staged.file_name.clone()),
            Self::field("Type", staged.mime_type.clone()),
            Self::field("Size", format_bytes(staged.size_bytes())),
        ];

        if let Some(preview) = self.selector.preview() {
            let pixels = match preview.dimensions {
                Some((w, h)) => format!("{} x {}", w, h),
                None => "unknown".to_string(),
            };
            lines.push(Self::field("Pixels", pixels));

            if self.show_preview_uri {
                let uri: String = preview.data_uri.chars().take(URI_PREVIEW_CHARS).collect();
                let elided = if preview.data_uri.len() > uri.len() {
                    format!("{}…", uri)
                } else {
                    uri
                };
                lines.push(Self::field("Preview", elided));
            }
        }

        lines.push(Line::from(""));
        if self.detecting {
            lines.push(Line::from(Span::styled(
                "Detecting...",
                styles::status_yellow(),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled("[d]", styles::keybinding()),
                Span::styled(" Detect  ", styles::text_secondary()),
                Span::styled("[x]", styles::keybinding()),
                Span::styled(" Remove  ", styles::text_secondary()),
                Span::styled("[o]", styles::keybinding()),
                Span::styled(" Replace", styles::text_secondary()),
            ]));
        }

        lines
    }
}

impl Widget for UploadPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.selector.has_file()).title(Span::styled(
            " Image ",
            styles::accent_bold(),
        ));

        Paragraph::new(self.staged_lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use woundscan_app::CandidateFile;

    fn selector_with(name: &str) -> FileSelector {
        let mut selector = FileSelector::new();
        selector
            .select(CandidateFile::new(name, "image/png", vec![0u8; 2048]))
            .unwrap();
        selector
    }

    #[test]
    fn test_empty_panel_prompts_to_open() {
        let mut term = TestTerminal::new();
        let selector = FileSelector::new();
        term.render_widget(UploadPanel::new(&selector), term.area());

        assert!(term.buffer_contains("No image selected"));
        assert!(term.buffer_contains("Open a JPEG or PNG image"));
        assert!(term.buffer_contains("16.0 MB"));
    }

    #[test]
    fn test_staged_file_details() {
        let mut term = TestTerminal::new();
        let selector = selector_with("knee.png");
        term.render_widget(UploadPanel::new(&selector), term.area());

        assert!(term.buffer_contains("knee.png"));
        assert!(term.buffer_contains("image/png"));
        assert!(term.buffer_contains("2.0 KB"));
        assert!(term.buffer_contains("Detect"));
        assert!(!term.buffer_contains("Detecting..."));
    }

    #[test]
    fn test_detecting_replaces_hints() {
        let mut term = TestTerminal::new();
        let selector = selector_with("knee.png");
        term.render_widget(UploadPanel::new(&selector).detecting(true), term.area());

        assert!(term.buffer_contains("Detecting..."));
        assert!(!term.buffer_contains("Remove"));
    }

    #[test]
    fn test_preview_uri_only_when_enabled() {
        let selector = selector_with("knee.png");

        let mut term = TestTerminal::new();
        term.render_widget(UploadPanel::new(&selector), term.area());
        assert!(!term.buffer_contains("data:image/png;base64,"));

        let mut term = TestTerminal::new();
        term.render_widget(UploadPanel::new(&selector).show_preview_uri(true), term.area());
        assert!(term.buffer_contains("data:image/png;base64,"));
    }
}
