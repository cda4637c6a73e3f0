//! Chathead - player head avatars as colored chat lines
//!
//! CLI entry point that dispatches to subcommands.

use chathead::cli::{Cli, Commands};
use chathead::config::ConfigManager;
use chathead::error::ChatheadResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ChatheadResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("chathead=warn"),
        1 => EnvFilter::new("chathead=info"),
        _ => EnvFilter::new("chathead=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Dispatch to command
    match cli.command {
        Commands::Render(args) => chathead::cli::commands::render(args, &config).await,
        Commands::Config(args) => {
            chathead::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
