//! woundscan-app - Application state and orchestration for Wound Scan
//!
//! Implements the TEA (The Elm Architecture) pattern: [`AppState`] is the
//! model, [`handler::update`] the update function, and [`UpdateAction`]s are
//! turned into background tasks by [`actions::handle_action`]. Also home to
//! the file selector, catalog cache, result renderer, detail modal
//! presenter and configuration loading.

pub mod actions;
pub mod alert;
pub mod catalog;
pub mod config;
pub mod detail_modal;
pub mod file_selector;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod results;
pub mod signals;
pub mod state;

// Re-export primary types
pub use actions::{AppServices, DetectionTask};
pub use catalog::{CatalogLookup, CatalogState, WoundInfoCatalog};
pub use detail_modal::{DetailModalPresenter, DetailView, ModalState, ShowOutcome};
pub use file_selector::{CandidateFile, FileSelector, Preview};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::{InputKey, ScrollDirection};
pub use message::Message;
pub use results::{RenderedEntry, RenderedView};
pub use state::{AppState, UiMode};
