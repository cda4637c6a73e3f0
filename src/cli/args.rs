//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Chathead - player head avatars as colored chat lines
///
/// Fetches a square avatar image, caches it on disk and renders it as a
/// grid of colored block glyphs with optional message lines.
#[derive(Parser, Debug)]
#[command(name = "chathead")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(long, global = true, env = "CHATHEAD_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a player head to the terminal
    Render(RenderArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Player identifier (UUID or provider-specific name)
    pub player: String,

    /// Head edge length in pixels (one chat line per row)
    #[arg(short, long, default_value = "8")]
    pub size: u32,

    /// Center message lines against the chat page width
    #[arg(short, long)]
    pub center: bool,

    /// Message line to append to the next pixel row (repeatable,
    /// supports &-color codes)
    #[arg(short, long = "message")]
    pub message: Vec<String>,

    /// Skip the avatar cache for this render
    #[arg(long)]
    pub no_cache: bool,

    /// Cache directory override
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
