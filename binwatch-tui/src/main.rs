//! Terminal dashboard for binwatch that shows live fill levels of smart waste bins.

mod app;
mod config;
mod input;
mod logging;
mod ui;

use std::{io, time::Duration as StdDuration};

use anyhow::Result;
use binwatch_core::{
    BinSource, Dashboard, RefreshSimulator, RefreshTicket,
    seed::{ConfiguredSource, SeedSource},
};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::App;
use crate::config::{Cli, Settings};
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings + logging, before the terminal is taken over
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    logging::init_logging(settings.log_file.as_deref(), settings.log_level)?;

    let simulator = match settings.seed {
        Some(seed) => RefreshSimulator::seeded(seed),
        None => RefreshSimulator::from_entropy(),
    };
    let source: Box<dyn BinSource> = if settings.bins.is_empty() {
        Box::new(SeedSource)
    } else {
        Box::new(ConfiguredSource::new(settings.bins))
    };
    let dashboard = Dashboard::from_source(source.as_ref(), simulator)
        .await?
        .with_latency(settings.latency);
    info!(
        bins = dashboard.bins().len(),
        latency_ms = settings.latency.as_millis(),
        "dashboard ready"
    );

    // App state
    let app = App::new(dashboard).with_locations(settings.locations);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<RefreshTicket>();

    loop {
        // Apply refreshes whose latency has elapsed
        while let Ok(ticket) = done_rx.try_recv() {
            if !app.dashboard.complete_refresh(ticket) {
                warn!("refresh ticket did not belong to this dashboard");
            }
        }

        app.advance_tick();
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Refresh => {
                    let Some(ticket) = app.dashboard.begin_refresh() else {
                        continue;
                    };
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let ticket = ticket.elapsed().await;
                        if done_tx.send(ticket).is_err() {
                            warn!("dashboard closed before refresh completed");
                        }
                    });
                }
            }
        }
    }

    Ok(())
}
