//! Wire types for the OpenRouter chat-completions API.
//!
//! OpenRouter speaks the common chat-completions dialect: a `messages` array
//! whose `content` is either a plain string or a list of typed parts (text
//! and `image_url` entries carrying data URIs), and a `choices` array in the
//! response. The model catalog endpoint returns `{data: [{id, pricing}]}`.

use serde::{Deserialize, Serialize};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

// ==================== Requests ====================

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<OutgoingMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct OutgoingMessage {
    pub role: &'static str,
    pub content: OutgoingContent,
}

impl OutgoingMessage {
    /// A plain text turn.
    pub fn text(role: &'static str, content: impl Into<String>) -> Self {
        Self {
            role,
            content: OutgoingContent::Text(content.into()),
        }
    }

    /// A multi-part turn (text plus images).
    pub fn multimodal(role: &'static str, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: OutgoingContent::Parts(parts),
        }
    }
}

/// Message content: a bare string or typed parts for multimodal turns.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutgoingContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

// ==================== Responses ====================

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// ==================== Model catalog ====================

#[derive(Debug, Deserialize)]
pub struct ModelListResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub pricing: Option<PricingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PricingEntry {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub completion: String,
}
