//! Classifier provider trait and factory
//!
//! Backends are interchangeable implementations of [`ClassifierProvider`],
//! selected by name through [`create_provider`]. The trait boundary is
//! infallible: whatever happens on the wire, `analyze` returns a well-formed
//! [`SegmentVerdict`] — failure is represented as a degraded verdict with
//! `backend_error` set, never as an error the caller must handle.

use super::ollama::OllamaProvider;
use super::vision::VisionModelProvider;
use crate::adapters::classifier::models::ClassificationPayload;
use crate::config::ClassifierConfig;
use crate::domain::{Result, SegmentVerdict, VigilError};
use async_trait::async_trait;
use std::sync::Arc;

/// System message used when the chat-shape fallback fires for classification
pub(crate) const CLASSIFY_SYSTEM: &str =
    "You return only compact JSON for sensitivity classification.";

/// Fixed classification instruction prompt
///
/// The field contract here is load-bearing: the parser expects exactly these
/// output keys.
const CLASSIFY_INSTRUCTIONS: &str = "You are a data sensitivity classifier. \
Rate the sensitivity of the text on a scale from 1-10, where 10 is extremely sensitive. \
Think about why the data is actually sensitive. \
Sample and example files should not be marked as sensitive. \
Reply strictly as compact JSON with keys: \
sensitivity_score (integer 1-10), confidence (0..1), sensitive_categories (array of strings), \
detected_patterns (array of strings), explanation (string explaining the score), \
recommendations (array of strings). \
Sensitive categories can include: PII, PHI, Financial, Credentials, Secrets, StudentRecords, Legal, HR, Proprietary. \
Provide a clear explanation of why you assigned that sensitivity score.";

/// Trait for interchangeable classification backends
///
/// # Example
///
/// ```no_run
/// use vigil::adapters::classifier::create_provider;
/// use vigil::config::ClassifierConfig;
///
/// # async fn example() -> vigil::domain::Result<()> {
/// let config = ClassifierConfig::default();
/// let provider = create_provider(&config)?;
///
/// let verdict = provider.analyze("Quarterly rainfall report.", None).await;
/// assert!(verdict.sensitivity_score >= 1);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ClassifierProvider: Send + Sync {
    /// Classify one text segment
    ///
    /// `file_name` is an optional hint prepended to the prompt; file-name
    /// context changes classification by instruction (the prompt tells the
    /// model that sample/example files are not sensitive), not by code.
    ///
    /// Infallible by contract: transport or parse failures yield a degraded
    /// verdict with `backend_error` set and zero confidence.
    async fn analyze(&self, text: &str, file_name: Option<&str>) -> SegmentVerdict;

    /// Backend name recorded on every verdict
    fn name(&self) -> &str;

    /// Model identifier recorded on every verdict
    fn model(&self) -> &str;
}

/// Trait for backends that can describe image content
///
/// Used by the extraction collaborator to turn an image into analyzable
/// text; consumes the same transport contract as classification.
#[async_trait]
pub trait ImageDescriber: Send + Sync {
    /// Describe the content of an image, given its raw bytes
    async fn describe_image(&self, image: &[u8]) -> Result<String>;
}

/// Create a classifier provider from the configuration
///
/// Providers are keyed by `classifier.provider`:
/// - `ollama` — local text-model backend
/// - `vision` — vision-capable backend (also classifies text)
///
/// # Errors
///
/// Returns a configuration error for an unknown provider name or if the
/// transport cannot be built.
pub fn create_provider(config: &ClassifierConfig) -> Result<Arc<dyn ClassifierProvider>> {
    match config.provider.to_lowercase().as_str() {
        "ollama" => {
            tracing::info!(model = %config.model, host = %config.base_url, "Creating Ollama classifier");
            Ok(Arc::new(OllamaProvider::new(config)?) as Arc<dyn ClassifierProvider>)
        }
        "vision" => {
            tracing::info!(model = %config.model, host = %config.base_url, "Creating vision classifier");
            Ok(Arc::new(VisionModelProvider::new(config)?) as Arc<dyn ClassifierProvider>)
        }
        other => Err(VigilError::Configuration(format!(
            "Unsupported classifier provider: {other}"
        ))),
    }
}

/// Build the classification prompt for one text segment
pub(crate) fn build_classify_prompt(text: &str, file_name: Option<&str>) -> String {
    match file_name {
        Some(name) => {
            format!("{CLASSIFY_INSTRUCTIONS}\n\nFile name: {name}\n\nText:\n'''\n{text}\n'''\n\nJSON:")
        }
        None => format!("{CLASSIFY_INSTRUCTIONS}\n\nText:\n'''\n{text}\n'''\n\nJSON:"),
    }
}

/// Parse raw model output into a verdict
///
/// Missing fields default; output that is not valid JSON at all yields a
/// best-effort degraded verdict carrying a truncated excerpt of the raw
/// response so a reviewer can diagnose it.
pub(crate) fn parse_verdict(output: &str, backend_name: &str, backend_model: &str) -> SegmentVerdict {
    match serde_json::from_str::<ClassificationPayload>(output) {
        Ok(payload) => SegmentVerdict::new(
            payload.sensitivity_score,
            payload.confidence,
            payload.sensitive_categories.into_iter().collect(),
            payload.detected_patterns.into_iter().collect(),
            payload.explanation,
            payload.recommendations,
            backend_name,
            backend_model,
        ),
        Err(e) => {
            tracing::warn!(
                backend = backend_name,
                error = %e,
                "Failed to parse classifier output, degrading"
            );
            let mut verdict = SegmentVerdict::degraded(
                backend_name,
                backend_model,
                format!("unparseable response: {e}"),
            );
            verdict.explanation = format!("Failed to parse AI response: {}", excerpt(output, 200));
            verdict.recommendations = vec![excerpt(output, 300)];
            verdict
        }
    }
}

/// Character-safe prefix of at most `max_chars` characters
fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
