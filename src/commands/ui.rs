//! Interactive form command
//!
//! This module implements the default command: it takes over the terminal
//! and runs the cost form until the user quits.

use anyhow::Result;
use appcost::{catalog::CatalogClient, config::Config, estimator::Estimator, form::FormApp};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tracing::info;

/// Execute the ui command
pub async fn execute(cfg: &Config) -> Result<()> {
    info!(base_url = %cfg.api.base_url, "Starting cost form");

    let client = Arc::new(CatalogClient::new(cfg.api.base_url.clone()));
    let mut app = FormApp::new(Estimator::new(client));
    app.estimator.load_categories();

    run_form(&mut app).await
}

/// Run the form loop
async fn run_form(app: &mut FormApp) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    // Main loop
    let result = loop {
        // Pick up finished fetches, then redraw from the current state
        app.sync();
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }

        // Handle events with timeout; completions are applied on the next pass
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }

        // Let spawned fetches make progress
        tokio::task::yield_now().await;
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Cost form closed");
    result
}
