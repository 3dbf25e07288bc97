//! Main render/view function (View in TEA pattern)


use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use woundscan_app::state::{AppState, DetectionStatus, Region, UiMode};

use crate::theme::palette;
use crate::widgets::detail_modal::{self, DetailModal};
use crate::{layout, widgets};

fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

/// Render the complete UI (View function in TEA)
///
/// Besides drawing, this records where clickable things ended up
/// (`state.hit_regions`), keeps the results selection scrolled into view
/// and reports the modal's scroll limit.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);
    frame.render_widget(
        widgets::UploadPanel::new(&state.file_selector)
            .detecting(state.is_detecting())
            .show_preview_uri(state.settings.ui.show_preview_uri),
        areas.upload,
    );
    render_results(frame, areas.results, state);
    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    state.hit_regions.modal_content = None;
    state.hit_regions.modal_close = None;

    // The modal stays drawn under an alert raised while it is open
    if state.modal.is_open() {
        render_detail_modal(frame, state);
    }

    match state.ui_mode {
        UiMode::PathInput => {
            let prompt = widgets::PathPrompt::new(&state.path_input);
            let cursor = prompt.cursor_position(area);
            frame.render_widget(prompt, area);
            frame.set_cursor_position(cursor);
        }
        UiMode::Alert => {
            if let Some(alert) = &state.alert {
                frame.render_widget(widgets::AlertDialog::new(alert), area);
            }
        }
        UiMode::Normal | UiMode::DetailModal => {}
    }
}

fn render_results(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let detecting = match &state.detection {
        DetectionStatus::Detecting { file_name, .. } => Some(file_name.as_str()),
        DetectionStatus::Idle => None,
    };

    let list = widgets::ResultsPanel::list_area(area);
    state.results.ensure_visible(list.height as usize);

    frame.render_widget(
        widgets::ResultsPanel::new(&state.results).detecting(detecting),
        area,
    );

    state.hit_regions.result_rows = if detecting.is_none() && state.results.entry_count() > 0 {
        widgets::ResultsPanel::visible_rows(&state.results, list)
            .into_iter()
            .map(|(rect, index)| (region(rect), index))
            .collect()
    } else {
        Vec::new()
    };
}

fn render_detail_modal(frame: &mut Frame, state: &mut AppState) {
    let screen = frame.area();

    let limit = state
        .modal
        .view()
        .map(|view| detail_modal::max_scroll(view, screen));
    if let Some(limit) = limit {
        state.modal.set_max_scroll(limit);
    }

    let Some(open) = state.modal.open() else {
        return;
    };
    frame.render_widget(DetailModal::new(open), screen);

    if state.ui_mode == UiMode::DetailModal {
        let modal = detail_modal::modal_rect(screen);
        state.hit_regions.modal_content = Some(region(modal));
        state.hit_regions.modal_close = Some(region(detail_modal::close_button_rect(modal)));
    }
}
