//! usrapi-manager binary entry point.
//!
//! Parses configuration, sets up logging and the HTTP client, then runs the
//! TUI in raw mode and restores the terminal on exit.
//!
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use usrapi_manager::app::keymap::Keymap;
use usrapi_manager::app::{self, AppState};
use usrapi_manager::config::{Cli, Settings};
use usrapi_manager::{HttpCollectionClient, logging};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse());
    logging::init(&settings)?;

    let client = HttpCollectionClient::new(&settings.base_url, settings.timeout)?;
    let endpoint = client.collection_url().to_string();
    let keymap = Keymap::load_or_init(&settings.keybinds_path());
    let state = AppState::new(Arc::new(client), keymap, endpoint);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
