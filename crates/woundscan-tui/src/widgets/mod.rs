//! Custom widget components

mod alert_dialog;
pub mod detail_modal;
mod header;
pub mod modal_overlay;
mod path_prompt;
mod results_panel;
mod status_bar;
pub mod text;
mod upload_panel;

pub use alert_dialog::AlertDialog;
pub use detail_modal::DetailModal;
pub use header::MainHeader;
pub use path_prompt::PathPrompt;
pub use results_panel::ResultsPanel;
pub use status_bar::StatusBar;
pub use upload_panel::UploadPanel;
