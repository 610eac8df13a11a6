//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Classifier transport failures are modeled here but are always recovered
//! into a degraded verdict at the provider boundary, never surfaced to callers
//! of `analyze()`.

use thiserror::Error;

/// Main Vigil error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VigilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Classifier backend errors
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Scan pipeline errors
    #[error("Scan error: {0}")]
    Scan(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Classifier transport errors
///
/// Errors that occur when talking to the inference endpoint. These don't
/// expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Failed to connect to the inference host
    #[error("Failed to connect to inference host: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Endpoint shape not available on this deployment (HTTP 404)
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body didn't match the expected structure
    #[error("Invalid response from inference host: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for VigilError {
    fn from(err: std::io::Error) -> Self {
        VigilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VigilError {
    fn from(err: serde_json::Error) -> Self {
        VigilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VigilError {
    fn from(err: toml::de::Error) -> Self {
        VigilError::Configuration(format!("TOML parse error: {err}"))
    }
}
