//! Action handlers: UpdateAction dispatch and background task spawning

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use woundscan_client::{fetch_catalog, CatalogSource, DetectionClient};
use woundscan_core::prelude::*;

use crate::config::Settings;
use crate::file_selector::CandidateFile;
use crate::handler::UpdateAction;
use crate::message::Message;

/// Service handles background tasks need
#[derive(Debug, Clone)]
pub struct AppServices {
    pub detection: DetectionClient,
    pub catalog_source: CatalogSource,
    pub catalog_timeout: Duration,
}

impl AppServices {
    pub fn new(
        detection: DetectionClient,
        catalog_source: CatalogSource,
        catalog_timeout: Duration,
    ) -> Self {
        Self {
            detection,
            catalog_source,
            catalog_timeout,
        }
    }

    /// Build services from settings. Fails on an unusable server URL or
    /// an incomplete catalog source.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoints = settings.endpoints()?;
        let catalog_source = settings.catalog_source(&endpoints)?;
        let detection =
            DetectionClient::with_timeout(endpoints.detect_url().clone(), settings.request_timeout());

        Ok(Self::new(
            detection,
            catalog_source,
            settings.catalog_timeout(),
        ))
    }
}

/// Handle of the one detection task that may be running
#[derive(Debug, Default)]
pub struct DetectionTask {
    handle: Option<JoinHandle<()>>,
}

impl DetectionTask {
    pub fn new() -> Self {
        Self::default()
    }

    fn replace(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.handle.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the running task. Returns whether one was still running.
    pub fn abort(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                if running {
                    debug!("Aborted detection task");
                }
                running
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &AppServices,
    detection_task: &mut DetectionTask,
) {
    match action {
        UpdateAction::LoadCandidate { path } => {
            tokio::spawn(async move {
                let msg = match CandidateFile::load(&path).await {
                    Ok(candidate) => Message::FileLoaded(candidate),
                    Err(e) => Message::FileLoadFailed {
                        path,
                        error: e.to_string(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::RunDetection { request_id, file } => {
            let client = services.detection.clone();
            let handle = tokio::spawn(async move {
                let msg = match client.detect(&file).await {
                    Ok(result) => Message::DetectionCompleted { request_id, result },
                    Err(error) => Message::DetectionFailed { request_id, error },
                };
                if msg_tx.send(msg).await.is_err() {
                    debug!("Detection #{} finished after the UI went away", request_id);
                }
            });
            detection_task.replace(handle);
        }

        UpdateAction::CancelDetection => {
            detection_task.abort();
        }

        UpdateAction::LoadCatalog => {
            let source = services.catalog_source.clone();
            let deadline = services.catalog_timeout;
            tokio::spawn(async move {
                let msg = match fetch_catalog(&source, deadline).await {
                    Ok(entries) => Message::CatalogLoaded(entries),
                    Err(e) => Message::CatalogLoadFailed(e),
                };
                let _ = msg_tx.send(msg).await;
            });
        }
    }
}
