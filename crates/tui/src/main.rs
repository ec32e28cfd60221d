//! Fatwa TUI - terminal client for a draft-fatwa knowledge base
//!
//! Browses records served by the remote fatwa API: list with topic and
//! search filters, detail view with references and feedback, and feedback
//! submission.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use fatwa_tui::{App, Config};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("fatwa-tui")
        .version("0.1.0")
        .about("Terminal client for browsing draft fatawa and posting feedback")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .value_name("URL")
                .help("Fatwa API server URL")
                .default_value("http://localhost:8000"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .get_matches();

    let config = Config::load(
        matches.get_one::<String>("config"),
        matches
            .get_one::<String>("server")
            .context("server argument missing")?,
        matches
            .get_one::<String>("log-level")
            .context("log-level argument missing")?,
    )?;

    init_tracing(&config.logging.level)?;

    info!("Starting fatwa TUI client");
    info!("Server: {}", config.server_url);

    test_connectivity(&config).await;

    let mut app = App::new(config).await?;
    app.run().await?;

    info!("Fatwa TUI client shutting down");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Failed to create tracing filter")?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing")?;

    Ok(())
}

/// Probe the server once before taking over the terminal. A failure is
/// reported but does not abort; the first in-app fetch will surface it in
/// the status line.
async fn test_connectivity(config: &Config) {
    info!("Testing connectivity to fatwa server...");

    match fatwa_tui::client::test_connection(&config.server_url).await {
        Ok(response) => {
            info!(
                "Connected to fatwa server ({} topics)",
                response.topics.len()
            );
        }
        Err(e) => {
            warn!("Could not connect to fatwa server: {}", e);
            warn!("Make sure the server is running at: {}", config.server_url);
        }
    }
}
