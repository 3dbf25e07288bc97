//! Path prompt: the terminal stand-in for a file picker

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;
use woundscan_app::state::PathInputState;

use super::modal_overlay::{centered_rect, draw_backdrop};
use crate::theme::styles;

const PROMPT_WIDTH: u16 = 64;
const PROMPT_HEIGHT: u16 = 6;
const INPUT_PREFIX: &str = "> ";

pub struct PathPrompt<'a> {
    input: &'a PathInputState,
}

impl<'a> PathPrompt<'a> {
    pub fn new(input: &'a PathInputState) -> Self {
        Self { input }
    }

    pub fn prompt_rect(screen: Rect) -> Rect {
        centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, screen)
    }

    fn input_row(prompt: Rect) -> Rect {
        Rect::new(
            prompt.x.saturating_add(2),
            prompt.y.saturating_add(2),
            prompt.width.saturating_sub(4),
            1,
        )
    }

    /// Where the terminal cursor belongs while typing
    pub fn cursor_position(&self, screen: Rect) -> Position {
        let row = Self::input_row(Self::prompt_rect(screen));
        let typed = INPUT_PREFIX.width() + self.visible_tail(row.width).width();
        let x = row.x.saturating_add(typed as u16).min(row.right().saturating_sub(1));
        Position::new(x, row.y)
    }

    /// End of the buffer that fits in `width` columns, leaving room for the cursor
    fn visible_tail(&self, width: u16) -> &str {
        let room = (width as usize).saturating_sub(INPUT_PREFIX.width() + 1);
        let buffer = self.input.buffer.as_str();
        let mut start = 0;
        while buffer[start..].width() > room {
            start += buffer[start..].chars().next().map_or(1, char::len_utf8);
        }
        &buffer[start..]
    }
}

impl Widget for PathPrompt<'_> {
    /// `area` is the whole screen; the prompt centers itself
    fn render(self, area: Rect, buf: &mut Buffer) {
        let prompt = Self::prompt_rect(area);
        draw_backdrop(buf, area, prompt);
        styles::modal_block(" Open Image ", styles::border_active()).render(prompt, buf);

        let row = Self::input_row(prompt);
        Paragraph::new(Line::from(vec![
            Span::styled(INPUT_PREFIX, styles::accent()),
            Span::styled(self.visible_tail(row.width).to_string(), styles::text_bright_bold()),
        ]))
        .render(row, buf);

        let hint_row = Rect::new(row.x, row.y.saturating_add(2), row.width, 1);
        Line::from(vec![
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" open  ", styles::text_muted()),
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" cancel  ", styles::text_muted()),
            Span::styled("Ctrl+U", styles::keybinding()),
            Span::styled(" clear", styles::text_muted()),
        ])
        .render(hint_row, buf);
    }
}
