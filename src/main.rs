//! Wound Scan - terminal client for a wound-detection service
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;

use clap::Parser;
use woundscan_app::config::{self, SettingsOverrides};
use woundscan_core::logging;
use woundscan_core::prelude::*;

/// Wound Scan - detect wounds in a photo and browse first-aid guidance
#[derive(Parser, Debug)]
#[command(name = "woundscan")]
#[command(about = "Terminal client for a wound-detection service", long_about = None)]
struct Args {
    /// Image to stage on startup (required with --headless)
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Detection server base URL
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Config file [default: <config_dir>/wound-scan/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read the wound info catalog from a local JSON file instead of the server
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Detection request timeout in seconds
    #[arg(long, value_name = "N")]
    timeout_secs: Option<u64>,

    /// Run one detection and print NDJSON events (no TUI)
    #[arg(long, requires = "image")]
    headless: bool,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.init_config {
        return init_config(args.config);
    }

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Logging goes to a file; a failure here should not stop the client
    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut settings = config::load_settings(args.config.as_deref());
    SettingsOverrides {
        server: args.server,
        catalog_path: args.catalog,
        timeout_secs: args.timeout_secs,
    }
    .apply(&mut settings);
    info!("Server: {}", settings.server.base_url);

    if args.headless {
        let Some(image) = args.image else {
            return Err(Error::config("--headless needs an IMAGE"));
        };
        let outcome = wound_scan::run_headless(settings, image).await?;
        if !outcome.is_success() {
            std::process::exit(outcome.exit_code());
        }
        return Ok(());
    }

    let result = wound_scan::run(settings, args.image).await;
    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    info!("Wound Scan exiting");
    result
}

fn init_config(explicit: Option<PathBuf>) -> Result<()> {
    let Some(path) = explicit.or_else(config::default_config_path) else {
        return Err(Error::config("no config directory on this platform"));
    };

    if config::init_config_file(&path)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}
