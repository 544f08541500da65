mod application;
mod cli;
mod cli_handlers;
mod config;
mod core;
mod logging;
mod modules;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use tracing::{debug, error};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("Could not load configuration")?;
    if let Some(log_path) = logging::init(&config.log_level) {
        debug!(log = %log_path.display(), "logging initialized");
    }

    let command = cli_handlers::from_cli(cli.command.unwrap_or_default(), config);
    if let Err(e) = command.execute() {
        error!(error = %e, "command failed");
        return Err(e);
    }

    Ok(())
}
