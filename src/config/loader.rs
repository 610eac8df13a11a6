//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VigilConfig;
use crate::domain::errors::VigilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VigilConfig
/// 4. Applies environment variable overrides (VIGIL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use vigil::config::loader::load_config;
///
/// let config = load_config("vigil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VigilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VigilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VigilError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VigilConfig = toml::from_str(&contents)
        .map_err(|e| VigilError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VigilError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static env var regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VigilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the VIGIL_* prefix
///
/// Environment variables follow the pattern: VIGIL_<SECTION>_<KEY>
/// For example: VIGIL_CLASSIFIER_BASE_URL, VIGIL_CHUNKING_CHUNK_SIZE
fn apply_env_overrides(config: &mut VigilConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("VIGIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Classifier overrides
    if let Ok(val) = std::env::var("VIGIL_CLASSIFIER_PROVIDER") {
        config.classifier.provider = val;
    }
    if let Ok(val) = std::env::var("VIGIL_CLASSIFIER_MODEL") {
        config.classifier.model = val;
    }
    if let Ok(val) = std::env::var("VIGIL_CLASSIFIER_BASE_URL") {
        config.classifier.base_url = val;
    }
    if let Ok(val) = std::env::var("VIGIL_CLASSIFIER_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.classifier.timeout_seconds = timeout;
        }
    }

    // Chunking overrides
    if let Ok(val) = std::env::var("VIGIL_CHUNKING_CHUNK_SIZE") {
        if let Ok(size) = val.parse() {
            config.chunking.chunk_size = size;
        }
    }
    if let Ok(val) = std::env::var("VIGIL_CHUNKING_OVERLAP") {
        if let Ok(overlap) = val.parse() {
            config.chunking.overlap = overlap;
        }
    }

    // Scoring overrides
    if let Ok(val) = std::env::var("VIGIL_SCORING_BOOST_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.scoring.boost_threshold = threshold;
        }
    }
    if let Ok(val) = std::env::var("VIGIL_SCORING_BOOST_AMOUNT") {
        if let Ok(amount) = val.parse() {
            config.scoring.boost_amount = amount;
        }
    }

    // Scan overrides
    if let Ok(val) = std::env::var("VIGIL_SCAN_PARALLELISM") {
        if let Ok(parallelism) = val.parse() {
            config.scan.parallelism = parallelism;
        }
    }
    if let Ok(val) = std::env::var("VIGIL_SCAN_OUTPUT_DIR") {
        config.scan.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VIGIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VIGIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VIGIL_TEST_VAR", "test_value");
        let input = "model = \"${VIGIL_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "model = \"test_value\"\n");
        std::env::remove_var("VIGIL_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VIGIL_MISSING_VAR");
        let input = "model = \"${VIGIL_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("VIGIL_COMMENTED_VAR");
        let input = "# model = \"${VIGIL_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
name = "vigil"
log_level = "info"

[classifier]
provider = "ollama"
model = "llama3.1"
base_url = "http://localhost:11434"

[chunking]
chunk_size = 1500
overlap = 300
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.application.name, "vigil");
        assert_eq!(config.chunking.chunk_size, 1500);
    }

    #[test]
    fn test_load_config_invalid_values_rejected() {
        let toml_content = r#"
[chunking]
chunk_size = 100
overlap = 100
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
