//! CLI module for the control panel
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `watch` - Live dashboard, refreshed on a timer
//! - `status` - Run one refresh cycle and print the dashboard
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Watch a backend on another host
//! panel watch --url http://10.0.0.5:8000
//!
//! # One-shot status as JSON
//! panel status --json
//! ```

pub mod completions;
pub mod config;
pub mod status;
pub mod watch;

pub use completions::handle_completions;
pub use config::{handle_config_init, load_config_with_overrides};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// P1 Control Panel - backend status dashboard
#[derive(Parser, Debug)]
#[command(
    name = "panel",
    version,
    about = "Terminal control panel for a P1 backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a live dashboard refreshed on a timer
    Watch(WatchArgs),
    /// Refresh once and print the dashboard
    Status(StatusArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by commands that talk to the backend
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Path to configuration file [default: panel.toml, if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL (e.g., http://localhost:8000)
    #[arg(short, long, env = "PANEL_API_URL")]
    pub url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PANEL_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Refresh interval in milliseconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Skip a refresh while the previous one is still running
    #[arg(long)]
    pub skip_overlap: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "panel.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
