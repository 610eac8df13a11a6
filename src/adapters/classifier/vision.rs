//! Vision-capable classifier backend
//!
//! Same classification flow as the text backend, plus image description for
//! the extraction path. Image bytes go over the wire base64-encoded, the way
//! Ollama's multimodal endpoints expect them.

use super::provider::{
    build_classify_prompt, parse_verdict, ClassifierProvider, ImageDescriber, CLASSIFY_SYSTEM,
};
use super::transport::InferenceTransport;
use crate::config::ClassifierConfig;
use crate::domain::{Result, SegmentVerdict};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub const PROVIDER_NAME: &str = "vision";

const DESCRIBE_SYSTEM: &str =
    "You describe images factually and completely, including any visible text.";
const DESCRIBE_PROMPT: &str = "Describe the content of this image. \
Transcribe any visible text verbatim. Mention names, numbers, and identifiers if present.";

pub struct VisionModelProvider {
    transport: InferenceTransport,
}

impl VisionModelProvider {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            transport: InferenceTransport::new(config)?,
        })
    }
}

#[async_trait]
impl ClassifierProvider for VisionModelProvider {
    async fn analyze(&self, text: &str, file_name: Option<&str>) -> SegmentVerdict {
        let prompt = build_classify_prompt(text, file_name);

        match self.transport.completion(CLASSIFY_SYSTEM, &prompt, None).await {
            Ok(output) => parse_verdict(&output, PROVIDER_NAME, self.transport.model()),
            Err(e) => {
                tracing::error!(
                    backend = PROVIDER_NAME,
                    model = self.transport.model(),
                    error = %e,
                    "Classification request failed"
                );
                SegmentVerdict::degraded(PROVIDER_NAME, self.transport.model(), e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        self.transport.model()
    }
}

#[async_trait]
impl ImageDescriber for VisionModelProvider {
    async fn describe_image(&self, image: &[u8]) -> Result<String> {
        let encoded = BASE64.encode(image);
        let output = self
            .transport
            .completion(DESCRIBE_SYSTEM, DESCRIBE_PROMPT, Some(vec![encoded]))
            .await?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> ClassifierConfig {
        ClassifierConfig {
            provider: "vision".to_string(),
            base_url: base_url.to_string(),
            model: "qwen2.5vl".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_describe_image_sends_base64_payload() {
        let mut server = mockito::Server::new_async().await;
        let expected = BASE64.encode(b"fake-png-bytes");
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::PartialJsonString(format!(
                r#"{{"images": ["{expected}"]}}"#
            )))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "A scanned invoice addressed to J. Smith."}"#)
            .create_async()
            .await;

        let provider = VisionModelProvider::new(&test_config(&server.url())).unwrap();
        let description = provider.describe_image(b"fake-png-bytes").await.unwrap();

        mock.assert_async().await;
        assert_eq!(description, "A scanned invoice addressed to J. Smith.");
    }

    #[tokio::test]
    async fn test_describe_image_propagates_transport_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("out of memory")
            .create_async()
            .await;

        let provider = VisionModelProvider::new(&test_config(&server.url())).unwrap();
        let result = provider.describe_image(b"fake-png-bytes").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_analyze_classifies_text_like_the_text_backend() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"response": "{\"sensitivity_score\": 3, \"confidence\": 0.6, \"sensitive_categories\": [], \"detected_patterns\": [], \"explanation\": \"Generic content.\", \"recommendations\": []}"}"#,
            )
            .create_async()
            .await;

        let provider = VisionModelProvider::new(&test_config(&server.url())).unwrap();
        let verdict = provider.analyze("hello there", None).await;

        assert_eq!(verdict.sensitivity_score, 3);
        assert_eq!(verdict.backend_name, "vision");
        assert_eq!(verdict.backend_model, "qwen2.5vl");
    }
}
