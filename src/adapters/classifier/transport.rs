//! HTTP transport for the inference endpoints
//!
//! Implements the two-endpoint fallback protocol once, shared by every
//! backend: try the single-turn completion endpoint; if that deployment
//! responds 404, retry exactly once via the chat endpoint with the same
//! instructions as a system message. Never more than one fallback attempt.

use super::models::{ChatMessage, ChatRequest, ChatResponse, GenerateRequest, GenerateResponse};
use crate::config::ClassifierConfig;
use crate::domain::errors::ClassifierError;
use crate::domain::{Result, VigilError};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

/// Shared transport to one inference host
pub struct InferenceTransport {
    client: Client,
    generate_url: String,
    chat_url: String,
    model: String,
    temperature: f64,
}

impl InferenceTransport {
    /// Build a transport from the classifier configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                VigilError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            generate_url: format!("{base_url}/api/generate"),
            chat_url: format!("{base_url}/api/chat"),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Model identifier this transport sends requests for
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion, falling back to the chat shape on 404
    ///
    /// Returns the trimmed raw output text. `system` becomes the system
    /// message when the chat fallback fires; `images` are attached to both
    /// request shapes for vision-capable models.
    pub async fn completion(
        &self,
        system: &str,
        prompt: &str,
        images: Option<Vec<String>>,
    ) -> std::result::Result<String, ClassifierError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            images: images.clone(),
            stream: false,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(
                url = %self.generate_url,
                "Completion endpoint not found, retrying via chat endpoint"
            );
            return self.chat_fallback(system, prompt, images).await;
        }

        let response = check_status(response).await?;
        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        Ok(body.response.trim().to_string())
    }

    /// One chat-shape retry, issued only after a 404 from the completion shape
    async fn chat_fallback(
        &self,
        system: &str,
        prompt: &str,
        images: Option<Vec<String>>,
    ) -> std::result::Result<String, ClassifierError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user(prompt, images),
            ],
            stream: false,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClassifierError::EndpointNotFound(format!(
                "neither completion nor chat endpoint available at {}",
                self.chat_url
            )));
        }

        let response = check_status(response).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        Ok(body.message.content.trim().to_string())
    }
}

/// Map reqwest send errors into the transport taxonomy
fn map_send_error(err: reqwest::Error) -> ClassifierError {
    if err.is_timeout() {
        ClassifierError::Timeout(err.to_string())
    } else {
        ClassifierError::ConnectionFailed(err.to_string())
    }
}

/// Convert non-success statuses into classifier errors
async fn check_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, ClassifierError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if status.is_server_error() {
        Err(ClassifierError::ServerError {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(ClassifierError::ClientError {
            status: status.as_u16(),
            message,
        })
    }
}
