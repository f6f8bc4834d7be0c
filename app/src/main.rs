use anyhow::Result;
use clap::Parser;
use log::warn;

mod cli;
mod commands;
mod config;
mod demo;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = config::load_config(cli.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_default();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter)).init();
    if let Err(e) = &loaded {
        warn!("{:#}, using defaults", e);
    }

    match cli.command {
        Command::Run { file, entry, times } => commands::run(&file, entry.as_deref(), times, &config),
        Command::Nodes => commands::nodes(),
        Command::Demo { file } => commands::demo(&file),
        Command::Validate { file } => commands::validate(&file, &config),
        Command::Config { write } => commands::show_config(&config, cli.config.as_deref(), write),
    }
}
