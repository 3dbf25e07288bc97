//! Main TUI runner - entry point and event loop

use std::path::PathBuf;

use tokio::sync::mpsc;
use woundscan_app::actions::{handle_action, AppServices, DetectionTask};
use woundscan_app::config::Settings;
use woundscan_app::message::Message;
use woundscan_app::process::process_message;
use woundscan_app::signals;
use woundscan_app::state::AppState;
use woundscan_app::UpdateAction;
use woundscan_core::prelude::*;

use super::{event, render, terminal};

/// Run the interactive client.
///
/// `initial_image`, when given, is loaded as if typed into the path prompt.
pub async fn run(settings: Settings, initial_image: Option<PathBuf>) -> Result<()> {
    let services = AppServices::from_settings(&settings)?;
    info!(
        "Starting TUI: detect={}, catalog={}",
        services.detection.endpoint(),
        services.catalog_source
    );

    terminal::install_panic_hook();

    let mouse = settings.ui.mouse;
    let mut state = AppState::with_settings(settings);
    let mut detection_task = DetectionTask::new();

    // Unified message channel (background tasks, signal handler)
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());

    // The catalog loads once, in parallel with everything else
    handle_action(
        UpdateAction::LoadCatalog,
        msg_tx.clone(),
        &services,
        &mut detection_task,
    );

    if let Some(path) = initial_image {
        process_message(
            &mut state,
            Message::LoadFile(path),
            &msg_tx,
            &services,
            &mut detection_task,
        );
    }

    let mut term = ratatui::init();
    if mouse {
        if let Err(e) = terminal::enable_mouse_capture() {
            warn!("Mouse capture unavailable: {}", e);
        }
    }

    let result = run_loop(
        &mut term,
        &mut state,
        msg_rx,
        msg_tx,
        &services,
        &mut detection_task,
    );

    if detection_task.abort() {
        info!("Cancelled detection in flight on exit");
    }

    if mouse {
        if let Err(e) = terminal::disable_mouse_capture() {
            warn!("Failed to release mouse capture: {}", e);
        }
    }
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    services: &AppServices,
    detection_task: &mut DetectionTask,
) -> Result<()> {
    while !state.should_quit() {
        // Results from background tasks and signals
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx, services, detection_task);
        }

        // Render
        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            process_message(state, message, &msg_tx, services, detection_task);
        }
    }

    Ok(())
}
