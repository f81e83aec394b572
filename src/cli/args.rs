//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::config::{DEFAULT_ADDRESS, DEFAULT_PORT};

/// Preview a markdown file in the browser - with hot reloading
#[derive(Parser, Debug, Clone)]
#[command(
    name = "md-preview",
    version,
    about,
    long_about = None,
    override_usage = "md-preview [OPTIONS] <FILE>"
)]
pub struct Cli {
    /// Markdown file to watch and render
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Sets the port for the server to run on (1-65535)
    #[arg(short, long, default_value_t = i64::from(DEFAULT_PORT), allow_negative_numbers = true)]
    pub port: i64,

    /// Change the event emitter to listen on another address
    /// (`localhost`, `any`, or an IPv4 address)
    #[arg(short, long, default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
