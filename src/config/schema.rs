//! Configuration schema types
//!
//! This module defines the configuration structure for Vigil. Every component
//! takes its settings from an explicitly constructed section of this config,
//! there is no implicit global state.

use serde::{Deserialize, Serialize};
use url::Url;

/// Main Vigil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VigilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Classifier backend configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Text segmentation settings
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Heuristic score-boost policy
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Scan pipeline settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VigilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.classifier.validate()?;
        self.chunking.validate()?;
        self.scoring.validate()?;
        self.scan.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in reports
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            ));
        }
        Ok(())
    }
}

/// Classifier backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Provider name (ollama or vision)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier, provider-specific
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the inference host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sampling temperature passed to the backend
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            temperature: default_temperature(),
        }
    }
}

impl ClassifierConfig {
    fn validate(&self) -> Result<(), String> {
        match self.provider.to_lowercase().as_str() {
            "ollama" | "vision" => {}
            other => {
                return Err(format!(
                    "Invalid classifier provider '{other}'. Must be 'ollama' or 'vision'"
                ))
            }
        }

        if self.model.trim().is_empty() {
            return Err("classifier.model must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid classifier.base_url '{}': {e}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "classifier.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("classifier.timeout_seconds must be greater than zero".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "classifier.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        Ok(())
    }
}

/// Text segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters repeated across chunk boundaries
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl ChunkingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunking.chunk_size must be greater than zero".to_string());
        }
        if self.overlap >= self.chunk_size {
            return Err(format!(
                "chunking.overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.overlap, self.chunk_size
            ));
        }
        Ok(())
    }
}

/// Heuristic score-boost policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Backend scores below this value are eligible for boosting
    #[serde(default = "default_boost_threshold")]
    pub boost_threshold: u8,

    /// Amount added to an eligible score when heuristics fire
    #[serde(default = "default_boost_amount")]
    pub boost_amount: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            boost_threshold: default_boost_threshold(),
            boost_amount: default_boost_amount(),
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=10).contains(&self.boost_threshold) {
            return Err(format!(
                "scoring.boost_threshold must be between 1 and 10, got {}",
                self.boost_threshold
            ));
        }
        if self.boost_amount > 9 {
            return Err(format!(
                "scoring.boost_amount must be at most 9, got {}",
                self.boost_amount
            ));
        }
        Ok(())
    }
}

/// Scan pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Concurrent classification calls per file (1 = sequential)
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Directory for scan reports
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<(), String> {
        if self.parallelism == 0 {
            return Err("scan.parallelism must be at least 1".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("scan.output_dir must not be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily or hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_log_max_size")]
    pub local_max_size_mb: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
            local_max_size_mb: default_log_max_size(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.local_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!(
                "Invalid logging.local_rotation '{other}'. Must be 'daily' or 'hourly'"
            )),
        }
    }
}

fn default_app_name() -> String {
    "vigil".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_temperature() -> f64 {
    0.2
}

fn default_chunk_size() -> usize {
    1000
}

fn default_overlap() -> usize {
    200
}

fn default_boost_threshold() -> u8 {
    5
}

fn default_boost_amount() -> u8 {
    2
}

fn default_parallelism() -> usize {
    1
}

fn default_output_dir() -> String {
    "results".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

fn default_log_max_size() -> u64 {
    100
}
