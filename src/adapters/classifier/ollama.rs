//! Ollama classifier backend
//!
//! Text-only backend talking to a local Ollama server through the shared
//! [`InferenceTransport`].

use super::provider::{build_classify_prompt, parse_verdict, ClassifierProvider, CLASSIFY_SYSTEM};
use super::transport::InferenceTransport;
use crate::config::ClassifierConfig;
use crate::domain::{Result, SegmentVerdict};
use async_trait::async_trait;

pub const PROVIDER_NAME: &str = "ollama";

pub struct OllamaProvider {
    transport: InferenceTransport,
}

impl OllamaProvider {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            transport: InferenceTransport::new(config)?,
        })
    }
}

#[async_trait]
impl ClassifierProvider for OllamaProvider {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> ClassifierConfig {
        ClassifierConfig {
            base_url: base_url.to_string(),
            model: "llama3.1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_analyze_parses_json_output() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"response": "{\"sensitivity_score\": 8, \"confidence\": 0.9, \"sensitive_categories\": [\"Credentials\"], \"detected_patterns\": [], \"explanation\": \"API keys present.\", \"recommendations\": [\"Rotate keys\"]}"}"#,
            )
            .create_async()
            .await;

        let provider = OllamaProvider::new(&test_config(&server.url())).unwrap();
        let verdict = provider.analyze("AWS_SECRET_ACCESS_KEY=abc123", None).await;

        mock.assert_async().await;
        assert_eq!(verdict.sensitivity_score, 8);
        assert_eq!(verdict.confidence, 0.9);
        assert!(verdict.categories.contains("Credentials"));
        assert_eq!(verdict.backend_name, "ollama");
        assert_eq!(verdict.backend_model, "llama3.1");
        assert!(verdict.backend_error.is_none());
    }

    #[tokio::test]
    async fn test_analyze_degrades_on_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("model exploded")
            .create_async()
            .await;

        let provider = OllamaProvider::new(&test_config(&server.url())).unwrap();
        let verdict = provider.analyze("some text", None).await;

        mock.assert_async().await;
        assert_eq!(verdict.sensitivity_score, 1);
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.is_degraded());
        assert!(verdict
            .explanation
            .starts_with("Error occurred during analysis:"));
    }

    #[tokio::test]
    async fn test_analyze_degrades_when_server_unreachable() {
        let provider = OllamaProvider::new(&test_config("http://127.0.0.1:1")).unwrap();
        let verdict = provider.analyze("some text", None).await;

        assert!(verdict.is_degraded());
        assert!(verdict.backend_error.is_some());
    }
}
