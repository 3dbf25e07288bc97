//! Configuration for Wound Scan
//!
//! Supports:
//! - `<config_dir>/wound-scan/config.toml` - User settings
//! - `--config PATH` - An explicit settings file
//! - Command-line overrides applied on top of either

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings, SettingsOverrides};
pub use types::*;
