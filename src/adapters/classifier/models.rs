//! Wire models for the inference endpoints
//!
//! Two request shapes are supported: the single-turn completion endpoint and
//! the structured chat endpoint. Different backend deployments expose only
//! one of the two, so the transport tries completion first and falls back to
//! chat on a 404.

use serde::{Deserialize, Serialize};

/// Request body for the single-turn completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model identifier
    pub model: String,

    /// Full prompt text
    pub prompt: String,

    /// Base64-encoded images, for vision-capable models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Streaming disabled; the whole response arrives in one body
    pub stream: bool,

    /// Sampling temperature
    pub temperature: f64,
}

/// Response body from the completion endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Raw model output text
    pub response: String,
}

/// One message in a chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (system or user)
    pub role: String,

    /// Message content
    pub content: String,

    /// Base64-encoded images attached to this message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            images: None,
        }
    }

    /// Create a user message, optionally carrying images
    pub fn user(content: impl Into<String>, images: Option<Vec<String>>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            images,
        }
    }
}

/// Request body for the chat endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,

    /// Conversation messages
    pub messages: Vec<ChatMessage>,

    /// Streaming disabled
    pub stream: bool,

    /// Sampling temperature
    pub temperature: f64,
}

/// Response body from the chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Assistant message containing the model output
    pub message: ChatMessage,
}

/// Structured classification payload expected inside the model output text
///
/// Every field defaults when absent so a partial response still yields a
/// usable verdict instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationPayload {
    /// Sensitivity rating, 1-10
    #[serde(default = "default_score")]
    pub sensitivity_score: i64,

    /// Model confidence, 0.0-1.0
    #[serde(default)]
    pub confidence: f64,

    /// Sensitive-data category labels
    #[serde(default)]
    pub sensitive_categories: Vec<String>,

    /// Pattern labels reported by the model
    #[serde(default)]
    pub detected_patterns: Vec<String>,

    /// Why the score was assigned
    #[serde(default)]
    pub explanation: String,

    /// Suggested follow-up actions
    #[serde(default)]
    pub recommendations: Vec<String>,
}

fn default_score() -> i64 {
    1
}
