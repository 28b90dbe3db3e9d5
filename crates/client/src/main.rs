//! Warboard terminal client.
//!
//! Composition root: loads configuration from the environment, wires
//! the HTTP transport and roster service together, reads the seed
//! list, and hands everything to the TUI event loop.

mod app;
mod config;
mod logging;
mod terminal;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};

use warboard_api::{ApiConfig, HttpTransport, RosterService, SnapshotBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let client_config = config::ClientConfig::from_env();
    logging::setup_logging()?;

    let api_config = ApiConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("Starting Warboard client");
    tracing::info!("Region: {}", api_config.region.slug());
    tracing::info!("Seed list: {}", client_config.seed_file.display());

    let transport =
        Arc::new(HttpTransport::new(api_config.clone()).context("building HTTP transport")?);
    let service = RosterService::new(SnapshotBuilder::new(transport, api_config));

    // Seed-list I/O errors are handed to the app, which degrades to an
    // empty roster with a visible error state.
    let seed = warboard_core::seed::read_seed_file(&client_config.seed_file);

    let mut tui = terminal::init()?;
    let _guard = terminal::TerminalGuard;

    let result = app::App::new(service).run(&mut tui, seed).await;

    terminal::restore()?;
    tracing::info!("Client shutdown complete");
    result
}
