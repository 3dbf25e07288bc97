//! Shared modal overlay utilities.
//!
//! Centering, backdrop dimming and the drop shadow used by every popup
//! (detail modal, alert dialog, path prompt).

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area.
///
/// # Examples
/// ```
/// use ratatui::layout::Rect;
/// use woundscan_tui::widgets::modal_overlay::centered_rect;
///
/// let area = Rect::new(0, 0, 80, 24);
/// assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim all cells in the given area, leaving their symbols in place.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow along the right and bottom edges of `modal_rect`.
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal_rect.right();
    for y in (modal_rect.y + 1)..=modal_rect.bottom() {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }

    let bottom_y = modal_rect.bottom();
    for x in (modal_rect.x + 1)..=modal_rect.right() {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Prepare a popup: dim everything, cast the shadow, then blank the popup
/// rect so its content draws on a clean surface.
pub fn draw_backdrop(buf: &mut Buffer, screen: Rect, modal_rect: Rect) {
    dim_background(buf, screen);
    render_shadow(buf, modal_rect);
    Clear.render(modal_rect, buf);
}
