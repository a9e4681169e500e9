// ABOUTME: Configuration management for loan-stepper
// Loads ~/.loan-stepper/config.toml, falling back to defaults for anything missing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::wizard::{CompletionSink, JsonlSink, SinkChain, TracingSink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Event poll timeout in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Directory for JSONL logs (default: ~/.loan-stepper/logs)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Where submitted steps go besides the log
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Append each submitted step as a JSON line to this file
    #[serde(default)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Whether to show the key hint footer
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self { show_key_hints: default_true() }
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            log_dir: None,
            submission: SubmissionConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

impl AppConfig {
    /// Get the base loan-stepper directory
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".loan-stepper"))
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directories exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = self.to_toml()?;
        fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Resolved log directory
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            Self::base_dir()
                .map(|base| base.join("logs"))
                .unwrap_or_else(|_| PathBuf::from(".loan-stepper/logs"))
        })
    }

    /// Sinks that receive submitted steps: always the log, plus a file when configured
    pub fn completion_sink(&self) -> Box<dyn CompletionSink> {
        let chain = SinkChain::new().with(TracingSink);
        match &self.submission.output {
            Some(path) => Box::new(chain.with(JsonlSink::new(path))),
            None => Box::new(chain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.submission.output.is_none());
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[submission]\noutput = \"/tmp/loan.jsonl\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.submission.output, Some(PathBuf::from("/tmp/loan.jsonl")));
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.tick_rate_ms = 100;
        config.ui.show_key_hints = false;

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_rate_ms = \"fast\"").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
