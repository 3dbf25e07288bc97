//! Key event handlers for UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    // Ctrl+C always quits
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::PathInput => handle_key_path_input(state, key),
        UiMode::DetailModal => handle_key_detail_modal(key),
        UiMode::Alert => handle_key_alert(key),
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),

        // File selection
        InputKey::Char('o') | InputKey::Char('/') => Some(Message::OpenPathPrompt),
        InputKey::Char('x') | InputKey::Delete => Some(Message::ClearFile),
        InputKey::Char('r') => Some(Message::Reset),

        // Detection
        InputKey::Char('d') => Some(Message::StartDetection),

        // Results
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPreviousEntry),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNextEntry),
        InputKey::Enter | InputKey::Char('i') => {
            if state.results.entry_count() > 0 {
                Some(Message::ShowSelectedDetail)
            } else if state.can_detect() {
                Some(Message::StartDetection)
            } else {
                None
            }
        }

        _ => None,
    }
}

fn handle_key_path_input(state: &mut AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SubmitPath),
        InputKey::Esc => Some(Message::CancelPathPrompt),
        InputKey::Backspace => {
            state.path_input.buffer.pop();
            None
        }
        InputKey::CharCtrl('u') => {
            state.path_input.buffer.clear();
            None
        }
        InputKey::Char(c) => {
            state.path_input.buffer.push(c);
            None
        }
        _ => None,
    }
}

fn handle_key_detail_modal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('c') | InputKey::Char('q') => Some(Message::CloseDetail),
        InputKey::Up | InputKey::Char('k') => Some(Message::ModalScrollUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ModalScrollDown),
        InputKey::PageUp => Some(Message::ModalPageUp),
        InputKey::PageDown | InputKey::Char(' ') => Some(Message::ModalPageDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::ModalScrollToTop),
        _ => None,
    }
}

fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char(' ') | InputKey::Char('y') => {
            Some(Message::DismissAlert)
        }
        _ => None,
    }
}
