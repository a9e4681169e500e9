// ABOUTME: CLI config command - create or print ~/.loan-stepper/config.toml

use super::{ConfigCommand, OutputFormat};
use crate::config::AppConfig;
use anyhow::Result;
use std::path::Path;

/// Execute a config subcommand
pub fn execute(command: ConfigCommand, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            let path = AppConfig::config_path()?;
            if init_at(&path, force)? {
                println!("✅ Wrote default config to {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
                println!("Use --force to overwrite it with the defaults.");
            }
        }
        ConfigCommand::Show => {
            let config = AppConfig::load()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                OutputFormat::Text => print!("{}", config.to_toml()?),
            }
        }
    }
    Ok(())
}

/// Write the default config to `path`; returns false when a file was left in place
pub fn init_at(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    AppConfig::default().save_to(path)?;
    Ok(true)
}
