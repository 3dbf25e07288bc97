//! Main update function - handles state transitions (TEA pattern)

use std::path::PathBuf;

use crate::alert::AlertState;
use crate::input_key::ScrollDirection;
use crate::message::Message;
use crate::state::{AppPhase, AppState, UiMode};
use woundscan_core::prelude::*;

use super::{keys::handle_key, mouse::handle_click, UpdateAction, UpdateResult};

/// Lines moved by one modal page
const MODAL_PAGE_LINES: u16 = 10;

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            cancel_in_flight(state)
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::MouseClick { column, row } => match handle_click(state, column, row) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::MouseScroll(direction) => {
            let follow_up = match (state.modal.is_open(), direction) {
                (true, ScrollDirection::Up) => Message::ModalScrollUp,
                (true, ScrollDirection::Down) => Message::ModalScrollDown,
                (false, ScrollDirection::Up) => Message::SelectPreviousEntry,
                (false, ScrollDirection::Down) => Message::SelectNextEntry,
            };
            UpdateResult::message(follow_up)
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // File Selection
        // ─────────────────────────────────────────────────────────
        Message::OpenPathPrompt => {
            state.open_path_prompt();
            UpdateResult::none()
        }

        Message::CancelPathPrompt => {
            state.close_path_prompt();
            UpdateResult::none()
        }

        Message::SubmitPath => {
            let raw = state.close_path_prompt();
            match normalize_path_input(&raw) {
                Some(path) => UpdateResult::message(Message::LoadFile(path)),
                None => UpdateResult::none(),
            }
        }

        Message::LoadFile(path) => {
            state.status_message = Some(format!("Opening {}", path.display()));
            UpdateResult::action(UpdateAction::LoadCandidate { path })
        }

        Message::FileLoaded(candidate) => {
            let file_name = candidate.file_name.clone();
            match state.file_selector.select(candidate) {
                Ok(staged) => {
                    state.status_message = Some(format!(
                        "Staged {} ({})",
                        staged.file_name,
                        woundscan_core::format_bytes(staged.size_bytes())
                    ));
                    // A new image invalidates whatever was shown or requested for the old one
                    state.results.clear();
                    state.close_detail();
                    cancel_in_flight(state)
                }
                Err(e) => {
                    info!("Selection of {} rejected: {}", file_name, e);
                    state.status_message = None;
                    state.show_alert(AlertState::invalid_file(&e));
                    UpdateResult::none()
                }
            }
        }

        Message::FileLoadFailed { path, error } => {
            warn!("Could not read {}: {}", path.display(), error);
            state.status_message = None;
            state.show_alert(AlertState::error("Cannot Open File", error));
            UpdateResult::none()
        }

        Message::ClearFile => {
            if state.file_selector.clear() {
                state.status_message = Some("Image removed".to_string());
            }
            state.results.clear();
            state.close_detail();
            cancel_in_flight(state)
        }

        Message::Reset => {
            state.reset();
            cancel_in_flight(state)
        }

        // ─────────────────────────────────────────────────────────
        // Detection
        // ─────────────────────────────────────────────────────────
        Message::StartDetection => {
            if state.is_detecting() {
                return UpdateResult::none();
            }
            if !state.file_selector.has_file() {
                state.show_alert(AlertState::no_file_selected());
                return UpdateResult::none();
            }
            if state.endpoints.is_none() {
                state.show_alert(AlertState::error(
                    "Server Unavailable",
                    format!("Invalid server URL: {}", state.settings.server.base_url),
                ));
                return UpdateResult::none();
            }
            match state.begin_detection() {
                Some((request_id, file)) => {
                    state.status_message = Some(format!("Detecting wounds in {}...", file.file_name));
                    UpdateResult::action(UpdateAction::RunDetection { request_id, file })
                }
                None => UpdateResult::none(),
            }
        }

        Message::DetectionCompleted { request_id, result } => {
            if !state.is_current_request(request_id) {
                debug!("Discarding stale detection result #{}", request_id);
                return UpdateResult::none();
            }
            state.apply_result(&result);
            UpdateResult::none()
        }

        Message::DetectionFailed { request_id, error } => {
            if !state.is_current_request(request_id) {
                debug!("Discarding stale detection failure #{}: {}", request_id, error);
                return UpdateResult::none();
            }
            state.cancel_detection();
            state.status_message = None;
            state.show_alert(AlertState::detection_failed(&error));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Catalog
        // ─────────────────────────────────────────────────────────
        Message::CatalogLoaded(entries) => {
            if state.catalog.mark_loaded(entries) {
                if let Some(view) = state.results.view.as_mut() {
                    view.refresh_references(&state.catalog);
                }
            }
            UpdateResult::none()
        }

        Message::CatalogLoadFailed(error) => {
            state.catalog.mark_failed(error);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Results & Detail Modal
        // ─────────────────────────────────────────────────────────
        Message::SelectNextEntry => {
            if !state.background_scroll_locked() {
                state.results.select_next();
            }
            UpdateResult::none()
        }

        Message::SelectPreviousEntry => {
            if !state.background_scroll_locked() {
                state.results.select_previous();
            }
            UpdateResult::none()
        }

        Message::ShowDetail { class_name } => {
            state.show_detail(&class_name);
            UpdateResult::none()
        }

        Message::ShowSelectedDetail => match state.results.selected_class() {
            Some(class_name) => UpdateResult::message(Message::ShowDetail {
                class_name: class_name.to_string(),
            }),
            None => UpdateResult::none(),
        },

        Message::CloseDetail => {
            state.close_detail();
            UpdateResult::none()
        }

        Message::ModalScrollUp => {
            state.modal.scroll_up(1);
            UpdateResult::none()
        }

        Message::ModalScrollDown => {
            state.modal.scroll_down(1);
            UpdateResult::none()
        }

        Message::ModalPageUp => {
            state.modal.scroll_up(MODAL_PAGE_LINES);
            UpdateResult::none()
        }

        Message::ModalPageDown => {
            state.modal.scroll_down(MODAL_PAGE_LINES);
            UpdateResult::none()
        }

        Message::ModalScrollToTop => {
            state.modal.scroll_to_top();
            UpdateResult::none()
        }

        Message::DismissAlert => {
            if state.ui_mode == UiMode::Alert {
                state.dismiss_alert();
            }
            UpdateResult::none()
        }
    }
}

/// Drop the in-flight request (if any) and ask the loop to abort its task
fn cancel_in_flight(state: &mut AppState) -> UpdateResult {
    if state.cancel_detection() {
        UpdateResult::action(UpdateAction::CancelDetection)
    } else {
        UpdateResult::none()
    }
}

/// Turn prompt text into a path: trims whitespace and quotes left by
/// terminal drag-and-drop, and expands a leading `~`.
pub(crate) fn normalize_path_input(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        return None;
    }

    if let Some(rest) = unquoted.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Some(home.join(rest));
        }
    }

    Some(PathBuf::from(unquoted))
}
