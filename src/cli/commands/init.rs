//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vigil.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Vigil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Make sure your model server is running (e.g. ollama serve)");
                println!("  3. Validate configuration: vigil validate-config");
                println!("  4. Run a scan: vigil scan <files>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Vigil Configuration File
# Document Sensitivity Scanner

[application]
name = "vigil"
log_level = "info"

[classifier]
provider = "ollama"  # ollama | vision
model = "llama3.1"
base_url = "http://localhost:11434"

[chunking]
chunk_size = 1000
overlap = 200

[scan]
output_dir = "results"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Vigil Configuration File
# Document Sensitivity Scanner
#
# Values of the form ${VAR_NAME} are substituted from the environment at
# load time. Every setting can also be overridden with a VIGIL_SECTION_KEY
# environment variable, e.g. VIGIL_CLASSIFIER_MODEL=mistral.

[application]
name = "vigil"
# Log level: trace, debug, info, warn, error
log_level = "info"

[classifier]
# Backend provider: "ollama" for text models, "vision" for multimodal models
provider = "ollama"
model = "llama3.1"
base_url = "http://localhost:11434"
# Per-request timeout in seconds; large documents can take a while
timeout_seconds = 120
# Sampling temperature; keep low for stable JSON output
temperature = 0.2

[chunking]
# Maximum chunk size in characters
chunk_size = 1000
# Characters of trailing context carried into the next chunk
overlap = 200

[scoring]
# Backend scores below this threshold get boosted when patterns are found
boost_threshold = 5
# Amount added to boosted scores
boost_amount = 2

[scan]
# Number of segments classified concurrently per file
parallelism = 1
# Directory for scan_results.json and summary.txt
output_dir = "results"

[logging]
# Local file logging (JSON lines with rotation)
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly
local_max_size_mb = 100
"#
        .to_string()
    }
}
