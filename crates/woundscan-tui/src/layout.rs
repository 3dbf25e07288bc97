//! Screen layout definitions for the TUI
//!
//! Header on top, the upload and results panels side by side, and a
//! one-line status bar at the bottom. Narrow terminals stack the panels.

use ratatui::layout::{Constraint, Layout, Rect};

/// Below this width the panels are stacked vertically
pub const STACK_BELOW_WIDTH: u16 = 70;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and server URL
    pub header: Rect,
    /// Staged image details
    pub upload: Rect,
    /// Detection results list
    pub results: Rect,
    /// Status message and key hints
    pub status: Rect,
}

pub fn create(area: Rect) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(area);

    let [upload, results] = if area.width < STACK_BELOW_WIDTH {
        Layout::vertical([Constraint::Length(8), Constraint::Min(4)]).areas(body)
    } else {
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body)
    };

    ScreenAreas {
        header,
        upload,
        results,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_side_by_side() {
        let layout = create(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 29);
        assert_eq!(layout.upload.y, layout.results.y);
        assert_eq!(layout.upload.width + layout.results.width, 100);
        assert!(layout.results.width > layout.upload.width);
    }

    #[test]
    fn test_narrow_layout_stacks_panels() {
        let layout = create(Rect::new(0, 0, 50, 30));

        assert_eq!(layout.upload.x, layout.results.x);
        assert_eq!(layout.upload.height, 8);
        assert_eq!(layout.results.y, layout.upload.y + 8);
        assert_eq!(layout.results.height, 30 - 3 - 1 - 8);
    }
}
