//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Vigil configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Application: {}", config.application.name);
                println!("  Log Level: {}", config.application.log_level);
                println!("  Classifier Provider: {}", config.classifier.provider);
                println!("  Classifier Model: {}", config.classifier.model);
                println!("  Classifier Server: {}", config.classifier.base_url);
                println!("  Chunk Size: {}", config.chunking.chunk_size);
                println!("  Chunk Overlap: {}", config.chunking.overlap);
                println!("  Boost Threshold: {}", config.scoring.boost_threshold);
                println!("  Boost Amount: {}", config.scoring.boost_amount);
                println!("  Parallelism: {}", config.scan.parallelism);
                println!("  Output Directory: {}", config.scan.output_dir);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        let _ = format!("{args:?}");
    }
}
