mod api;
mod app;
mod bootstrap;
mod catalog;
mod cli;
mod config;
mod logging;
mod recents;
mod runtime;
mod time_utils;
mod types;
mod ui;

use anyhow::Result;
use app::App;
use bootstrap::RecentsSource;
use clap::Parser;
use cli::{Cli, Commands};
use config::HarvestConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let focused_date = cli.date.unwrap_or_else(time_utils::local_today);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::ConfigPath => {
            let path = HarvestConfig::config_path()?;
            if !path.exists() {
                HarvestConfig::default().save()?;
                println!("Created default config at {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
        Commands::Dev => {
            init_logging();
            println!("Running in dev mode with local in-memory data.");
            let service: Arc<dyn api::TimeTrackingService> =
                Arc::new(api::DevBackend::seeded(focused_date));
            let app =
                bootstrap::initialize_app(service.as_ref(), focused_date, RecentsSource::Memory)
                    .await?;
            run(app, service).await?;
        }
        Commands::Run => {
            init_logging();
            let config = HarvestConfig::load()?;
            config.require_credentials()?;
            let service: Arc<dyn api::TimeTrackingService> =
                Arc::new(api::HarvestClient::new(&config)?);
            let recents = RecentsSource::File(HarvestConfig::recents_path()?);
            let app = bootstrap::initialize_app(service.as_ref(), focused_date, recents).await?;
            run(app, service).await?;
        }
    }

    Ok(())
}

fn init_logging() {
    let result = HarvestConfig::log_path().and_then(|path| logging::init(&path));
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
}

async fn run(mut app: App, service: Arc<dyn api::TimeTrackingService>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, service).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("event loop failed: {err:#}");
        eprintln!("Error: {:#}", err);
    }

    if let Some(farewell) = &app.farewell {
        println!("{}", farewell);
    }

    if let Err(e) = app.recents.save() {
        eprintln!("Warning: could not save recent selections: {}", e);
    }

    Ok(())
}
