use anyhow::{Context, Result};
use clap::Parser;

use salaam_clock::cli::args::{Cli, Commands};
use salaam_clock::cli::handlers;
use salaam_clock::config::AppConfig;
use salaam_clock::tui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Some(Commands::Times { city }) => {
            handlers::handle_times(&config, &city)?;
        }
        Some(Commands::Next { city }) => {
            handlers::handle_next(&config, &city)?;
        }
        Some(Commands::Config) => {
            handlers::handle_config(&config)?;
        }

        // No subcommand → dashboard
        None => {
            tui::app::run(config)?;
        }
    }

    Ok(())
}
