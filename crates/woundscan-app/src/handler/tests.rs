//! Tests for handler module

use super::*;
use crate::alert::AlertKind;
use crate::detail_modal::ModalState;
use crate::file_selector::CandidateFile;
use crate::input_key::{InputKey, ScrollDirection};
use crate::message::Message;
use crate::state::{AppPhase, AppState, DetectionStatus, Region, UiMode};
use woundscan_client::{parse_catalog, WoundCatalogMap};
use woundscan_core::{
    Detection, DetectionError, DetectionResult, ValidationError, ADVISORY_MESSAGE,
};

const CATALOG: &str = r#"{
    "Laceration": {
        "name": "Luka Robek",
        "ciri_ciri": ["Tepi tidak rata"],
        "penanganan": [{"step": "Tekan luka", "penjelasan": "Kain bersih"}]
    },
    "Burn": {"name": "Luka Bakar", "tips": "Alirkan air dingin."}
}"#;

/// Run a message and every follow-up, collecting the actions
fn drive(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        actions.extend(result.action);
        msg = result.message;
    }
    actions
}

fn png_candidate(name: &str) -> CandidateFile {
    CandidateFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

fn catalog() -> WoundCatalogMap {
    parse_catalog(CATALOG).unwrap()
}

fn staged_state() -> AppState {
    let mut state = AppState::new();
    drive(&mut state, Message::FileLoaded(png_candidate("wound.png")));
    state
}

fn laceration_result() -> DetectionResult {
    DetectionResult {
        image_url: Some("/static/results/result_wound.png".to_string()),
        total_wounds: 2,
        detections: vec![
            Detection::new("Laceration", 0.873, vec![10.0, 20.0, 30.0, 40.0]),
            Detection::new("Abrasion", 0.5, vec![1.0, 2.0, 3.0, 4.0]),
        ],
    }
}

/// State with results shown and the catalog loaded
fn results_state() -> AppState {
    let mut state = staged_state();
    drive(&mut state, Message::CatalogLoaded(catalog()));
    drive(&mut state, Message::StartDetection);
    drive(
        &mut state,
        Message::DetectionCompleted {
            request_id: 1,
            result: laceration_result(),
        },
    );
    state
}

fn open_modal_state() -> AppState {
    let mut state = results_state();
    drive(
        &mut state,
        Message::ShowDetail {
            class_name: "Laceration".to_string(),
        },
    );
    state.hit_regions.modal_content = Some(Region::new(10, 5, 40, 20));
    state.hit_regions.modal_close = Some(Region::new(40, 23, 9, 1));
    state
}

// ─────────────────────────────────────────────────────────
// Quit
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting_phase() {
    let mut state = AppState::new();
    assert_ne!(state.phase, AppPhase::Quitting);

    update(&mut state, Message::Quit);

    assert!(state.should_quit());
}

#[test]
fn test_quit_while_detecting_cancels() {
    let mut state = staged_state();
    drive(&mut state, Message::StartDetection);

    let actions = drive(&mut state, Message::Quit);

    assert!(matches!(actions.as_slice(), [UpdateAction::CancelDetection]));
}

#[test]
fn test_ctrl_c_quits_from_any_mode() {
    let mut state = open_modal_state();
    assert!(matches!(
        handle_key(&mut state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));
}

#[test]
fn test_q_key_quits_in_normal_mode() {
    let mut state = AppState::new();
    assert!(matches!(
        handle_key(&mut state, InputKey::Char('q')),
        Some(Message::Quit)
    ));
}

// ─────────────────────────────────────────────────────────
// File selection
// ─────────────────────────────────────────────────────────

#[test]
fn test_path_prompt_collects_input() {
    let mut state = AppState::new();
    drive(&mut state, Message::Key(InputKey::Char('o')));
    assert_eq!(state.ui_mode, UiMode::PathInput);

    for c in "/tmp/a.pngx".chars() {
        drive(&mut state, Message::Key(InputKey::Char(c)));
    }
    drive(&mut state, Message::Key(InputKey::Backspace));
    let actions = drive(&mut state, Message::Key(InputKey::Enter));

    assert_eq!(state.ui_mode, UiMode::Normal);
    match actions.as_slice() {
        [UpdateAction::LoadCandidate { path }] => {
            assert_eq!(path, &std::path::PathBuf::from("/tmp/a.png"))
        }
        other => panic!("unexpected actions {:?}", other),
    }
}

#[test]
fn test_empty_path_submits_nothing() {
    let mut state = AppState::new();
    drive(&mut state, Message::OpenPathPrompt);
    let actions = drive(&mut state, Message::SubmitPath);
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_normalize_path_input_strips_quotes() {
    use super::update::normalize_path_input;
    assert_eq!(
        normalize_path_input("  '/tmp/my wound.jpg' "),
        Some(std::path::PathBuf::from("/tmp/my wound.jpg"))
    );
    assert_eq!(
        normalize_path_input("\"/tmp/a.png\""),
        Some(std::path::PathBuf::from("/tmp/a.png"))
    );
    assert_eq!(normalize_path_input("   "), None);
}

#[test]
fn test_file_loaded_stages_file() {
    let state = staged_state();
    assert!(state.file_selector.has_file());
    assert!(state.can_detect());
    assert!(state.status_message.as_deref().unwrap().contains("wound.png"));
}

#[test]
fn test_disallowed_type_alerts_and_keeps_staged_file() {
    let mut state = staged_state();

    drive(
        &mut state,
        Message::FileLoaded(CandidateFile::new("a.gif", "image/gif", vec![1])),
    );

    assert_eq!(state.ui_mode, UiMode::Alert);
    let alert = state.alert.as_ref().unwrap();
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(
        alert.message,
        ValidationError::UnsupportedType {
            mime_type: "image/gif".to_string()
        }
        .to_string()
    );
    assert_eq!(state.file_selector.staged().unwrap().file_name, "wound.png");
}

#[test]
fn test_new_selection_hides_previous_results() {
    let mut state = results_state();
    assert!(state.results.view.is_some());

    drive(&mut state, Message::FileLoaded(png_candidate("second.png")));

    assert!(state.results.view.is_none());
    assert_eq!(state.file_selector.staged().unwrap().file_name, "second.png");
}

#[test]
fn test_select_while_detecting_aborts_request() {
    let mut state = staged_state();
    drive(&mut state, Message::StartDetection);

    let actions = drive(&mut state, Message::FileLoaded(png_candidate("other.png")));

    assert!(matches!(actions.as_slice(), [UpdateAction::CancelDetection]));
    assert_eq!(state.detection, DetectionStatus::Idle);
    assert!(state.can_detect());
}

#[test]
fn test_clear_file_is_idempotent() {
    let mut state = staged_state();

    drive(&mut state, Message::ClearFile);
    assert!(!state.file_selector.has_file());
    assert!(!state.can_detect());

    let actions = drive(&mut state, Message::ClearFile);
    assert!(actions.is_empty());
    assert!(!state.file_selector.has_file());
}

#[test]
fn test_file_load_failure_alerts() {
    let mut state = AppState::new();
    drive(
        &mut state,
        Message::FileLoadFailed {
            path: "/nope.png".into(),
            error: "Image file not found: /nope.png".to_string(),
        },
    );
    assert_eq!(state.ui_mode, UiMode::Alert);
}

// ─────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────

#[test]
fn test_detect_without_file_alerts() {
    let mut state = AppState::new();
    let actions = drive(&mut state, Message::StartDetection);

    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::Alert);
    assert_eq!(state.alert.as_ref().unwrap().kind, AlertKind::Info);
}

#[test]
fn test_detect_spawns_single_request() {
    let mut state = staged_state();

    let actions = drive(&mut state, Message::StartDetection);
    match actions.as_slice() {
        [UpdateAction::RunDetection { request_id, file }] => {
            assert_eq!(*request_id, 1);
            assert_eq!(file.file_name, "wound.png");
        }
        other => panic!("unexpected actions {:?}", other),
    }

    // Disabled while in flight
    assert!(!state.can_detect());
    assert!(drive(&mut state, Message::StartDetection).is_empty());
}

#[test]
fn test_detection_completed_renders_results() {
    let state = results_state();

    assert_eq!(state.detection, DetectionStatus::Idle);
    let view = state.results.view.as_ref().unwrap();
    assert_eq!(view.total_wounds, 2);
    assert_eq!(view.entries[0].label(), "#1");
    assert_eq!(view.entries[0].confidence, "87%");
    assert_eq!(view.entries[0].position, "10, 20, 30, 40");
    assert!(view.entries[0].has_reference);
    assert!(!view.entries[1].has_reference);
    assert_eq!(
        view.image_url.as_deref(),
        Some("http://localhost:5000/static/results/result_wound.png")
    );
    assert!(state.can_detect());
}

#[test]
fn test_empty_result_shows_advisory() {
    let mut state = staged_state();
    drive(&mut state, Message::StartDetection);
    drive(
        &mut state,
        Message::DetectionCompleted {
            request_id: 1,
            result: DetectionResult::default(),
        },
    );

    let view = state.results.view.as_ref().unwrap();
    assert!(view.entries.is_empty());
    assert_eq!(view.advisory.as_deref(), Some(ADVISORY_MESSAGE));
}

#[test]
fn test_detection_failure_alerts_and_reenables() {
    let mut state = staged_state();
    drive(&mut state, Message::StartDetection);

    drive(
        &mut state,
        Message::DetectionFailed {
            request_id: 1,
            error: DetectionError::server(Some(500), None),
        },
    );

    assert_eq!(state.ui_mode, UiMode::Alert);
    assert!(state
        .alert
        .as_ref()
        .unwrap()
        .message
        .contains(DetectionError::GENERIC_MESSAGE));
    assert!(state.can_detect());
}

#[test]
fn test_stale_results_are_discarded() {
    let mut state = staged_state();
    drive(&mut state, Message::StartDetection);
    drive(&mut state, Message::ClearFile);
    drive(&mut state, Message::FileLoaded(png_candidate("again.png")));
    drive(&mut state, Message::StartDetection);

    // Late answer for the abandoned request #1
    drive(
        &mut state,
        Message::DetectionCompleted {
            request_id: 1,
            result: laceration_result(),
        },
    );
    assert!(state.results.view.is_none());
    assert!(state.is_detecting());

    drive(
        &mut state,
        Message::DetectionFailed {
            request_id: 1,
            error: DetectionError::transport("reset"),
        },
    );
    assert_ne!(state.ui_mode, UiMode::Alert);
}

#[test]
fn test_reset_clears_everything() {
    let mut state = results_state();
    drive(&mut state, Message::Reset);

    assert!(!state.file_selector.has_file());
    assert!(state.results.view.is_none());
    assert_eq!(state.modal.state(), &ModalState::Closed);
}

// ─────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────

#[test]
fn test_late_catalog_refreshes_reference_flags() {
    let mut state = staged_state();
    drive(&mut state, Message::StartDetection);
    drive(
        &mut state,
        Message::DetectionCompleted {
            request_id: 1,
            result: laceration_result(),
        },
    );
    assert!(!state.results.view.as_ref().unwrap().entries[0].has_reference);

    drive(&mut state, Message::CatalogLoaded(catalog()));

    assert!(state.results.view.as_ref().unwrap().entries[0].has_reference);
}

#[test]
fn test_catalog_failure_is_silent() {
    let mut state = AppState::new();
    drive(
        &mut state,
        Message::CatalogLoadFailed(woundscan_core::CatalogLoadError::parse("eof")),
    );
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.alert.is_none());
}

// ─────────────────────────────────────────────────────────
// Detail modal
// ─────────────────────────────────────────────────────────

#[test]
fn test_show_detail_on_unloaded_catalog_shows_advisory() {
    let mut state = AppState::new();
    drive(
        &mut state,
        Message::ShowDetail {
            class_name: "Laceration".to_string(),
        },
    );

    assert_eq!(state.modal.state(), &ModalState::Closed);
    assert_eq!(state.ui_mode, UiMode::Alert);
    assert_eq!(state.alert.as_ref().unwrap().message, ADVISORY_MESSAGE);

    drive(&mut state, Message::Key(InputKey::Enter));
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_enter_opens_selected_entry() {
    let mut state = results_state();
    drive(&mut state, Message::Key(InputKey::Enter));

    assert_eq!(state.ui_mode, UiMode::DetailModal);
    assert_eq!(state.modal.view().unwrap().title(), "Luka Robek");
    assert!(state.background_scroll_locked());
}

#[test]
fn test_unknown_class_entry_shows_advisory() {
    let mut state = results_state();
    drive(&mut state, Message::SelectNextEntry);
    drive(&mut state, Message::ShowSelectedDetail);

    assert_eq!(state.ui_mode, UiMode::Alert);
    assert!(!state.modal.is_open());
}

#[test]
fn test_escape_closes_modal() {
    let mut state = open_modal_state();
    drive(&mut state, Message::Key(InputKey::Esc));

    assert_eq!(state.modal.state(), &ModalState::Closed);
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(!state.background_scroll_locked());
}

#[test]
fn test_c_and_q_close_modal_without_quitting() {
    for key in ['c', 'q'] {
        let mut state = open_modal_state();
        drive(&mut state, Message::Key(InputKey::Char(key)));
        assert!(!state.modal.is_open());
        assert!(!state.should_quit());
    }
}

#[test]
fn test_close_button_click_closes_modal() {
    let mut state = open_modal_state();
    drive(&mut state, Message::MouseClick { column: 42, row: 23 });
    assert!(!state.modal.is_open());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_backdrop_click_closes_modal() {
    let mut state = open_modal_state();
    drive(&mut state, Message::MouseClick { column: 2, row: 2 });
    assert!(!state.modal.is_open());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_click_inside_content_keeps_modal_open() {
    let mut state = open_modal_state();
    drive(&mut state, Message::MouseClick { column: 20, row: 10 });
    assert!(state.modal.is_open());
}

#[test]
fn test_close_is_idempotent() {
    let mut state = open_modal_state();
    drive(&mut state, Message::CloseDetail);
    drive(&mut state, Message::CloseDetail);

    assert_eq!(state.modal.state(), &ModalState::Closed);
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_background_scroll_locked_while_open_and_restored_after() {
    let mut state = open_modal_state();
    state.modal.set_max_scroll(10);
    assert_eq!(state.results.selected, 0);

    drive(&mut state, Message::MouseScroll(ScrollDirection::Down));
    drive(&mut state, Message::SelectNextEntry);

    assert_eq!(state.results.selected, 0);
    assert_eq!(state.modal.open().unwrap().scroll, 1);

    drive(&mut state, Message::MouseClick { column: 0, row: 0 });
    drive(&mut state, Message::MouseScroll(ScrollDirection::Down));

    assert_eq!(state.results.selected, 1);
}

#[test]
fn test_modal_keys_scroll_content() {
    let mut state = open_modal_state();
    state.modal.set_max_scroll(30);

    drive(&mut state, Message::Key(InputKey::PageDown));
    drive(&mut state, Message::Key(InputKey::Down));
    assert_eq!(state.modal.open().unwrap().scroll, 11);

    drive(&mut state, Message::Key(InputKey::Home));
    assert_eq!(state.modal.open().unwrap().scroll, 0);
}

#[test]
fn test_click_on_result_row_opens_detail() {
    let mut state = results_state();
    state.hit_regions.result_rows = vec![(Region::new(0, 10, 40, 2), 0), (Region::new(0, 12, 40, 2), 1)];

    drive(&mut state, Message::MouseClick { column: 5, row: 11 });

    assert_eq!(state.results.selected, 0);
    assert!(state.modal.is_open());
}

#[test]
fn test_alert_dismissed_by_click() {
    let mut state = AppState::new();
    drive(&mut state, Message::StartDetection);
    drive(&mut state, Message::MouseClick { column: 0, row: 0 });
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.alert.is_none());
}
