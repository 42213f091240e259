//! Config command handlers and config loading for other commands

use crate::cli::{ConfigInitArgs, ConnectionArgs};
use crate::config::PanelConfig;
use std::fs;
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../panel.example.toml");
const DEFAULT_CONFIG_PATH: &str = "panel.toml";

/// Load configuration with CLI overrides
///
/// An explicit `--config` path must exist; the default `panel.toml` is only
/// read when present.
pub fn load_config_with_overrides(
    args: &ConnectionArgs,
) -> Result<PanelConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => PanelConfig::load(Some(path.as_path()))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            PanelConfig::load(Some(Path::new(DEFAULT_CONFIG_PATH)))?
        }
        None => {
            tracing::debug!("Config file not found, using defaults");
            PanelConfig::default()
        }
    };

    config = config.with_env_overrides();

    if let Some(ref url) = args.url {
        config.api.base_url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Handle `panel config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Edit this file to point the panel at your backend.");

    Ok(())
}
