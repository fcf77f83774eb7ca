// src/cli/mod.rs
//! Command-line surface for the layout engine.

pub mod args;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

use args::{Cli, Commands};

/// Parses arguments and dispatches to the matching handler.
///
/// # Errors
///
/// Returns error if the invoked handler fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = handlers::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            input,
            layout,
            json,
        } => handlers::handle_layout(&input, layout, json, config),
        Commands::Stats { input, json } => handlers::handle_stats(&input, json, config),
        Commands::Info { input } => handlers::handle_info(&input, config),
    }
}
