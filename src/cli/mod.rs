// ABOUTME: CLI argument parsing and command routing for loan-stepper
//
// Provides command-line interface for:
// - Running the interactive wizard (tui, default)
// - Printing the step track (steps)
// - Checking a step's values without the UI (validate)
// - Managing the config file (config)

pub mod settings;
pub mod steps;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::wizard::StepKind;

/// Multi-step loan application wizard for the terminal
#[derive(Parser)]
#[command(name = "loan-stepper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Print the steps and their fields
    Steps,

    /// Validate one step's field values from a JSON file
    Validate(ValidateArgs),

    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for the validate command
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Step whose rule set is applied
    #[arg(long, value_enum)]
    pub step: StepKind,

    /// JSON object of raw field values keyed by field name (e.g. {"email": "a@b.com"})
    #[arg(long)]
    pub values: PathBuf,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write the default config file if none exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_tui() {
        let cli = Cli::try_parse_from(["loan-stepper"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_validate_args() {
        let cli = Cli::try_parse_from([
            "loan-stepper",
            "validate",
            "--step",
            "director",
            "--values",
            "director.json",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Validate(args)) => {
                assert_eq!(args.step, StepKind::Director);
                assert_eq!(args.values, PathBuf::from("director.json"));
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_unknown_step_rejected() {
        let result = Cli::try_parse_from(["loan-stepper", "validate", "--step", "guarantor", "--values", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli = Cli::try_parse_from(["loan-stepper", "config", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config(ConfigCommand::Init { force: true }))));
    }
}
