//! Terminal setup and restoration

use std::io::stdout;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use woundscan_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Start receiving click and wheel events
pub fn enable_mouse_capture() -> Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    Ok(())
}

pub fn disable_mouse_capture() -> Result<()> {
    execute!(stdout(), DisableMouseCapture)?;
    Ok(())
}
