//! Mouse click handling
//!
//! Regions come from the previous frame (see [`crate::state::HitRegions`]).

use crate::message::Message;
use crate::state::{AppState, UiMode};

pub fn handle_click(state: &mut AppState, column: u16, row: u16) -> Option<Message> {
    match state.ui_mode {
        UiMode::Alert => Some(Message::DismissAlert),
        UiMode::DetailModal => click_in_modal(state, column, row),
        UiMode::Normal => click_in_results(state, column, row),
        UiMode::PathInput => None,
    }
}

fn click_in_modal(state: &AppState, column: u16, row: u16) -> Option<Message> {
    let regions = &state.hit_regions;

    if regions
        .modal_close
        .is_some_and(|close| close.contains(column, row))
    {
        return Some(Message::CloseDetail);
    }

    match regions.modal_content {
        Some(content) if content.contains(column, row) => None,
        // Backdrop
        _ => Some(Message::CloseDetail),
    }
}

fn click_in_results(state: &mut AppState, column: u16, row: u16) -> Option<Message> {
    let index = state
        .hit_regions
        .result_rows
        .iter()
        .find(|(region, _)| region.contains(column, row))
        .map(|(_, index)| *index)?;

    state.results.selected = index;
    Some(Message::ShowSelectedDetail)
}
