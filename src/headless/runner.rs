//! Headless mode runner - one detection without the TUI
//!
//! Drives the same state machine as the TUI: the catalog load and the file
//! read are dispatched as actions, their messages go through `update`, and
//! events are emitted from the resulting state.

use std::path::PathBuf;

use tokio::sync::mpsc;

use woundscan_app::actions::{handle_action, AppServices, DetectionTask};
use woundscan_app::config::Settings;
use woundscan_app::message::Message;
use woundscan_app::process::process_message;
use woundscan_app::signals;
use woundscan_app::state::{AppState, DetectionStatus, UiMode};
use woundscan_app::UpdateAction;
use woundscan_core::prelude::*;

use super::HeadlessEvent;

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessOutcome {
    /// A detection result was received (with or without wounds)
    Completed,
    /// The image was rejected or unreadable, or the request failed
    Failed,
    /// Interrupted by a signal
    Interrupted,
}

impl HeadlessOutcome {
    pub fn is_success(self) -> bool {
        self == HeadlessOutcome::Completed
    }

    pub fn exit_code(self) -> i32 {
        match self {
            HeadlessOutcome::Completed => 0,
            HeadlessOutcome::Failed => 1,
            HeadlessOutcome::Interrupted => 130,
        }
    }
}

/// Loop bookkeeping
#[derive(Debug, Default)]
struct Progress {
    catalog_settled: bool,
    detection: Option<bool>,
    failed_early: bool,
}

impl Progress {
    fn finished(&self) -> bool {
        self.failed_early || (self.catalog_settled && self.detection.is_some())
    }
}

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless(settings: Settings, image: PathBuf) -> Result<HeadlessOutcome> {
    info!("═══════════════════════════════════════════════════════");
    info!("Wound Scan starting in HEADLESS mode");
    info!("Image: {}", image.display());
    info!("═══════════════════════════════════════════════════════");

    let services = AppServices::from_settings(&settings)?;
    let mut state = AppState::with_settings(settings);
    let mut detection_task = DetectionTask::new();

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(64);
    signals::spawn_signal_handler(msg_tx.clone());

    handle_action(
        UpdateAction::LoadCatalog,
        msg_tx.clone(),
        &services,
        &mut detection_task,
    );
    process_message(
        &mut state,
        Message::LoadFile(image),
        &msg_tx,
        &services,
        &mut detection_task,
    );

    let outcome = headless_event_loop(
        &mut state,
        msg_rx,
        msg_tx,
        &services,
        &mut detection_task,
    )
    .await;

    detection_task.abort();
    info!("Wound Scan headless mode exiting: {:?}", outcome);
    Ok(outcome)
}

/// Main headless event loop
async fn headless_event_loop(
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    services: &AppServices,
    detection_task: &mut DetectionTask,
) -> HeadlessOutcome {
    let mut progress = Progress::default();

    while !progress.finished() {
        let Some(msg) = msg_rx.recv().await else {
            warn!("Message channel closed");
            return HeadlessOutcome::Failed;
        };

        emit_pre_message_events(state, &msg, &mut progress);
        let loaded_name = match &msg {
            Message::FileLoaded(candidate) => Some(candidate.file_name.clone()),
            _ => None,
        };

        process_message(state, msg, &msg_tx, services, detection_task);

        if state.should_quit() {
            info!("Quit requested");
            return HeadlessOutcome::Interrupted;
        }

        if let Some(file_name) = loaded_name {
            after_file_loaded(
                state,
                &file_name,
                &msg_tx,
                services,
                detection_task,
                &mut progress,
            );
        }
    }

    match progress.detection {
        Some(true) => {
            // Emitted last so reference flags reflect the settled catalog
            if let Some(view) = &state.results.view {
                HeadlessEvent::detection_completed(view).emit();
            }
            HeadlessOutcome::Completed
        }
        _ => HeadlessOutcome::Failed,
    }
}

/// Emit events that only the incoming message carries
fn emit_pre_message_events(state: &AppState, msg: &Message, progress: &mut Progress) {
    match msg {
        Message::CatalogLoaded(entries) => {
            progress.catalog_settled = true;
            HeadlessEvent::catalog_loaded(entries.len()).emit();
        }
        Message::CatalogLoadFailed(e) => {
            progress.catalog_settled = true;
            HeadlessEvent::catalog_failed(e.to_string()).emit();
        }
        Message::FileLoadFailed { path, error } => {
            progress.failed_early = true;
            HeadlessEvent::error(
                format!("Cannot open {}: {}", path.display(), error),
                true,
            )
            .emit();
        }
        Message::DetectionCompleted { request_id, .. } if state.is_current_request(*request_id) => {
            progress.detection = Some(true);
        }
        Message::DetectionFailed { request_id, error } if state.is_current_request(*request_id) => {
            progress.detection = Some(false);
            HeadlessEvent::detection_failed(error.to_string()).emit();
        }
        _ => {}
    }
}

/// Staged: report it and submit. Rejected: report the validation failure.
fn after_file_loaded(
    state: &mut AppState,
    file_name: &str,
    msg_tx: &mpsc::Sender<Message>,
    services: &AppServices,
    detection_task: &mut DetectionTask,
    progress: &mut Progress,
) {
    let Some(staged) = state.file_selector.staged() else {
        progress.failed_early = true;
        let message = match (&state.ui_mode, &state.alert) {
            (UiMode::Alert, Some(alert)) => alert.message.clone(),
            _ => "Image rejected".to_string(),
        };
        HeadlessEvent::validation_failed(file_name, message).emit();
        return;
    };

    let dimensions = state.file_selector.preview().and_then(|p| p.dimensions);
    HeadlessEvent::file_staged(
        &staged.file_name,
        &staged.mime_type,
        staged.size_bytes(),
        dimensions,
    )
    .emit();

    process_message(
        state,
        Message::StartDetection,
        msg_tx,
        services,
        detection_task,
    );

    match &state.detection {
        DetectionStatus::Detecting {
            file_name: submitted,
            ..
        } => {
            HeadlessEvent::detection_started(submitted, services.detection.endpoint().as_str())
                .emit();
        }
        DetectionStatus::Idle => {
            progress.failed_early = true;
            let message = state
                .alert
                .as_ref()
                .map(|a| a.message.clone())
                .unwrap_or_else(|| "Detection could not start".to_string());
            HeadlessEvent::detection_failed(message).emit();
        }
    }
}
