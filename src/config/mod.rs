//! Configuration management for Vigil.
//!
//! TOML-based configuration loading, parsing, and validation with support
//! for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VIGIL_*` environment variable overrides
//! - Default values for every setting
//! - Section-by-section validation
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "vigil"
//! log_level = "info"
//!
//! [classifier]
//! provider = "ollama"
//! model = "llama3.1"
//! base_url = "http://localhost:11434"
//! timeout_seconds = 120
//!
//! [chunking]
//! chunk_size = 1000
//! overlap = 200
//!
//! [scoring]
//! boost_threshold = 5
//! boost_amount = 2
//!
//! [scan]
//! parallelism = 1
//! output_dir = "results"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vigil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vigil.toml")?;
//! println!("Inference host: {}", config.classifier.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ChunkingConfig, ClassifierConfig, LoggingConfig, ScanConfig, ScoringConfig,
    VigilConfig,
};
