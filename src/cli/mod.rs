//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Vigil using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Vigil - Document Sensitivity Scanner
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
#[command(author = "Vigil Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vigil.toml", env = "VIGIL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VIGIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan files for sensitive content
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["vigil", "scan", "notes.txt"]);
        assert_eq!(cli.config, "vigil.toml");
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["vigil", "--config", "custom.toml", "scan", "notes.txt"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["vigil", "--log-level", "debug", "scan", "notes.txt"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["vigil", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["vigil", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_scan_overrides() {
        let cli = Cli::parse_from([
            "vigil",
            "scan",
            "--chunk-size",
            "500",
            "--model",
            "mistral",
            "notes.txt",
        ]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.chunk_size, Some(500));
                assert_eq!(args.model, Some("mistral".to_string()));
                assert_eq!(args.inputs, vec!["notes.txt".to_string()]);
            }
            _ => panic!("expected scan command"),
        }
    }
}
