//! Application state (Model in TEA pattern)

use woundscan_client::ServerEndpoints;
use woundscan_core::prelude::*;
use woundscan_core::{DetectionResult, StagedFile};

use crate::alert::AlertState;
use crate::catalog::WoundInfoCatalog;
use crate::config::Settings;
use crate::detail_modal::{DetailModalPresenter, ShowOutcome};
use crate::file_selector::FileSelector;
use crate::results::{self, RenderedView};

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Upload panel and results list
    #[default]
    Normal,

    /// Typing an image path
    PathInput,

    /// Wound detail modal over the results
    DetailModal,

    /// Blocking alert dialog
    Alert,
}

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// State of the single detection request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetectionStatus {
    #[default]
    Idle,
    Detecting { request_id: u64, file_name: String },
}

/// Screen rectangle recorded by the renderer for mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Clickable areas from the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitRegions {
    /// Modal content box (clicks outside it hit the backdrop)
    pub modal_content: Option<Region>,
    /// Modal close button
    pub modal_close: Option<Region>,
    /// Results rows, paired with the entry index (0-based)
    pub result_rows: Vec<(Region, usize)>,
}

/// Results list state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsState {
    pub view: Option<RenderedView>,
    /// Selected entry (0-based)
    pub selected: usize,
    /// First visible entry, maintained by the renderer
    pub offset: usize,
}

impl ResultsState {
    pub fn entry_count(&self) -> usize {
        self.view.as_ref().map(|v| v.entries.len()).unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let count = self.entry_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.view
            .as_ref()
            .and_then(|v| v.entries.get(self.selected))
            .map(|e| e.class_name.as_str())
    }

    /// Keep the selection inside a window of `height` rows
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Path prompt text buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInputState {
    pub buffer: String,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub phase: AppPhase,
    pub settings: Settings,
    /// `None` when the configured server URL is unusable
    pub endpoints: Option<ServerEndpoints>,

    pub file_selector: FileSelector,
    pub catalog: WoundInfoCatalog,
    pub detection: DetectionStatus,
    next_request_id: u64,

    pub results: ResultsState,
    pub modal: DetailModalPresenter,
    pub alert: Option<AlertState>,
    alert_return_mode: UiMode,
    pub path_input: PathInputState,

    /// One-line status shown in the status bar
    pub status_message: Option<String>,
    pub hit_regions: HitRegions,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let endpoints = match settings.endpoints() {
            Ok(endpoints) => Some(endpoints),
            Err(e) => {
                warn!("Server endpoints unavailable: {}", e);
                None
            }
        };

        Self {
            ui_mode: UiMode::Normal,
            phase: AppPhase::Running,
            settings,
            endpoints,
            file_selector: FileSelector::new(),
            catalog: WoundInfoCatalog::new(),
            detection: DetectionStatus::Idle,
            next_request_id: 0,
            results: ResultsState::default(),
            modal: DetailModalPresenter::new(),
            alert: None,
            alert_return_mode: UiMode::Normal,
            path_input: PathInputState::default(),
            status_message: None,
            hit_regions: HitRegions::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn is_detecting(&self) -> bool {
        matches!(self.detection, DetectionStatus::Detecting { .. })
    }

    /// The detect control is enabled iff an image is staged and nothing is in flight
    pub fn can_detect(&self) -> bool {
        self.file_selector.has_file() && !self.is_detecting()
    }

    /// While the modal is open the results list does not scroll
    pub fn background_scroll_locked(&self) -> bool {
        self.modal.is_open()
    }

    // ─────────────────────────────────────────────────────────
    // Detection lifecycle
    // ─────────────────────────────────────────────────────────

    /// Mark a new request in flight and return its id and payload
    pub fn begin_detection(&mut self) -> Option<(u64, StagedFile)> {
        if !self.can_detect() {
            return None;
        }
        let file = self.file_selector.staged()?.clone();
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.detection = DetectionStatus::Detecting {
            request_id,
            file_name: file.file_name.clone(),
        };
        self.results.clear();
        Some((request_id, file))
    }

    /// True if `request_id` is the request currently in flight
    pub fn is_current_request(&self, request_id: u64) -> bool {
        matches!(self.detection, DetectionStatus::Detecting { request_id: id, .. } if id == request_id)
    }

    /// Forget the in-flight request. Returns whether one existed.
    pub fn cancel_detection(&mut self) -> bool {
        let was_detecting = self.is_detecting();
        if was_detecting {
            info!("Abandoning in-flight detection");
        }
        self.detection = DetectionStatus::Idle;
        was_detecting
    }

    /// Render and store a completed result
    pub fn apply_result(&mut self, result: &DetectionResult) {
        self.detection = DetectionStatus::Idle;
        let view = results::render(result, &self.catalog, self.endpoints.as_ref());
        self.status_message = Some(view.summary());
        self.results = ResultsState {
            view: Some(view),
            selected: 0,
            offset: 0,
        };
    }

    // ─────────────────────────────────────────────────────────
    // Modal & alert
    // ─────────────────────────────────────────────────────────

    /// Open the detail modal for `class_name`, or raise the advisory
    pub fn show_detail(&mut self, class_name: &str) {
        match self.modal.show(class_name, &self.catalog) {
            ShowOutcome::Opened => self.ui_mode = UiMode::DetailModal,
            ShowOutcome::Advisory => self.show_alert(AlertState::advisory()),
        }
    }

    /// Close the detail modal. Idempotent.
    pub fn close_detail(&mut self) {
        if self.modal.close() {
            debug!("Detail modal closed");
        }
        self.hit_regions.modal_content = None;
        self.hit_regions.modal_close = None;
        if self.ui_mode == UiMode::DetailModal {
            self.ui_mode = UiMode::Normal;
        }
        if self.alert_return_mode == UiMode::DetailModal {
            self.alert_return_mode = UiMode::Normal;
        }
    }

    pub fn show_alert(&mut self, alert: AlertState) {
        if self.ui_mode != UiMode::Alert {
            self.alert_return_mode = self.ui_mode;
        }
        self.alert = Some(alert);
        self.ui_mode = UiMode::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() {
            self.ui_mode = if self.alert_return_mode == UiMode::DetailModal && !self.modal.is_open()
            {
                UiMode::Normal
            } else {
                self.alert_return_mode
            };
            self.alert_return_mode = UiMode::Normal;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Path prompt
    // ─────────────────────────────────────────────────────────

    pub fn open_path_prompt(&mut self) {
        self.path_input.buffer.clear();
        self.ui_mode = UiMode::PathInput;
    }

    pub fn close_path_prompt(&mut self) -> String {
        if self.ui_mode == UiMode::PathInput {
            self.ui_mode = UiMode::Normal;
        }
        std::mem::take(&mut self.path_input.buffer)
    }

    /// Drop staged image and results
    pub fn reset(&mut self) {
        self.file_selector.clear();
        self.results.clear();
        self.close_detail();
        self.status_message = None;
    }
}
