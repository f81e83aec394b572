//! md-preview - Live browser preview for a single markdown file.

mod actor;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod reload;
mod render;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tokio::sync::mpsc;

use actor::Coordinator;
use actor::coordinator::CHANNEL_BUFFER;
use cli::Cli;
use config::PreviewConfig;
use reload::hub::ContentHub;
use render::{Pipeline, Renderer};

fn main() {
    if let Err(e) = run() {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PreviewConfig::from_cli(&cli)?;
    debug!("config"; "watching {}", config.target.path().display());

    let hub = ContentHub::new();
    let pipeline = Arc::new(Pipeline::new(
        config.target.clone(),
        Renderer::default(),
        hub.clone(),
    ));

    let (render_tx, render_rx) = mpsc::channel(CHANNEL_BUFFER);
    let coordinator = Coordinator::new(pipeline, render_tx.clone(), render_rx)?;

    let server = cli::serve::bind_server(&config, hub, render_tx)?;
    server.run(coordinator)
}
