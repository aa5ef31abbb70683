//! Chat gateway port
//!
//! Defines the interface for communicating with chat-completion providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snapquiz_domain::Model;
use thiserror::Error;

/// Errors that can occur during gateway operations
///
/// Transport, authentication, and malformed-response failures are all
/// normalized here with a human-readable message. Retrying is the
/// orchestrator's job; this layer never retries.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No response from model")]
    EmptyResponse,

    #[error("Request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

/// Role of a message in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single text turn in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-token pricing advertised by the provider catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    pub prompt: String,
    pub completion: String,
}

impl ModelPricing {
    /// Whether both prices parse to zero.
    pub fn is_free(&self) -> bool {
        is_zero_price(&self.prompt) && is_zero_price(&self.completion)
    }
}

fn is_zero_price(price: &str) -> bool {
    price.trim().parse::<f64>().is_ok_and(|value| value == 0.0)
}

/// Catalog entry returned by [`ChatGateway::list_models`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<ModelPricing>,
}

impl ModelInfo {
    /// Whether the catalog advertises this model as zero-cost.
    pub fn is_free(&self) -> bool {
        self.pricing.as_ref().is_some_and(ModelPricing::is_free)
    }
}

/// Gateway for chat-completion providers
///
/// This port defines how the application layer talks to AI backends.
/// Adapters live in the infrastructure layer. Implementations perform no
/// caching and keep no state beyond the network call itself.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one multimodal user turn (prompt text plus an image data URI)
    /// and return the trimmed text of the first choice. Returns `Ok("")`
    /// when the choice carries no content.
    async fn extract_text_from_image(
        &self,
        api_key: &str,
        model: &Model,
        image_data: &str,
        prompt: &str,
    ) -> Result<String, GatewayError>;

    /// Send a single system+user exchange (or just user) and return the
    /// trimmed text of the first choice.
    async fn ask_model(
        &self,
        api_key: &str,
        model: &Model,
        system_prompt: Option<&str>,
        user_prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, GatewayError>;

    /// Send an arbitrary multi-turn conversation, preserving role order,
    /// and return the trimmed text of the latest assistant turn.
    async fn ask_model_followup(
        &self,
        api_key: &str,
        model: &Model,
        conversation: &[ChatMessage],
        temperature: Option<f32>,
    ) -> Result<String, GatewayError>;

    /// List the models known to the backend.
    async fn list_models(&self, api_key: Option<&str>) -> Result<Vec<ModelInfo>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_message() {
        assert_eq!(
            GatewayError::EmptyResponse.to_string(),
            "No response from model"
        );
    }

    #[test]
    fn test_pricing_free_detection() {
        let free = ModelPricing {
            prompt: "0".to_string(),
            completion: "0.0".to_string(),
        };
        assert!(free.is_free());

        let paid = ModelPricing {
            prompt: "0.0000007".to_string(),
            completion: "0".to_string(),
        };
        assert!(!paid.is_free());

        let unparsable = ModelPricing {
            prompt: "n/a".to_string(),
            completion: "0".to_string(),
        };
        assert!(!unparsable.is_free());
    }

    #[test]
    fn test_model_info_without_pricing_is_not_free() {
        let info = ModelInfo {
            id: "vendor/model".to_string(),
            pricing: None,
        };
        assert!(!info.is_free());
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, ChatRole::System);
        assert_eq!(ChatMessage::user("u").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("a").role, ChatRole::Assistant);
    }
}
