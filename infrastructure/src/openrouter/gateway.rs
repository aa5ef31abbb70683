//! OpenRouter gateway adapter
//!
//! Implements [`ChatGateway`] over the OpenRouter HTTP API. Auth is a bearer
//! token per request; the optional `HTTP-Referer`/`X-Title` headers carry app
//! attribution. This layer normalizes transport and response-shape failures
//! into [`GatewayError`] and never retries; retry policy belongs to the
//! orchestrator.

use super::protocol::{
    ChatCompletionRequest, ChatCompletionResponse, ContentPart, DEFAULT_BASE_URL, ImageUrl,
    ModelListResponse, OutgoingMessage,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use snapquiz_application::ports::chat_gateway::{
    ChatGateway, ChatMessage, GatewayError, ModelInfo, ModelPricing,
};
use snapquiz_domain::Model;
use tracing::debug;

pub struct OpenRouterGateway {
    http: reqwest::Client,
    base_url: String,
    referer: Option<String>,
    app_title: Option<String>,
}

impl OpenRouterGateway {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            referer: None,
            app_title: None,
        }
    }

    /// Set the `HTTP-Referer` attribution header.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set the `X-Title` attribution header.
    pub fn with_app_title(mut self, app_title: impl Into<String>) -> Self {
        self.app_title = Some(app_title.into());
        self
    }

    /// POST a chat-completion request and reduce the response to the trimmed
    /// text of its first choice.
    async fn post_chat(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, GatewayError> {
        debug!("POST {}/chat/completions model={}", self.base_url, request.model);

        let mut builder = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(request);
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.app_title {
            builder = builder.header("X-Title", title);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let parsed: ChatCompletionResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(GatewayError::EmptyResponse);
        };
        Ok(choice.message.content.unwrap_or_default().trim().to_string())
    }

    /// Map non-2xx statuses to gateway errors, reading the body for context.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Auth(message));
        }
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Default for OpenRouterGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatGateway for OpenRouterGateway {
    async fn extract_text_from_image(
        &self,
        api_key: &str,
        model: &Model,
        image_data: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![OutgoingMessage::multimodal(
                "user",
                vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data.to_string(),
                        },
                    },
                ],
            )],
            temperature: None,
        };
        self.post_chat(api_key, &request).await
    }

    async fn ask_model(
        &self,
        api_key: &str,
        model: &Model,
        system_prompt: Option<&str>,
        user_prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, GatewayError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(OutgoingMessage::text("system", system));
        }
        messages.push(OutgoingMessage::text("user", user_prompt));

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature,
        };
        self.post_chat(api_key, &request).await
    }

    async fn ask_model_followup(
        &self,
        api_key: &str,
        model: &Model,
        conversation: &[ChatMessage],
        temperature: Option<f32>,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: conversation
                .iter()
                .map(|m| OutgoingMessage::text(m.role.as_str(), m.content.clone()))
                .collect(),
            temperature,
        };
        self.post_chat(api_key, &request).await
    }

    async fn list_models(&self, api_key: Option<&str>) -> Result<Vec<ModelInfo>, GatewayError> {
        debug!("GET {}/models", self.base_url);

        let mut builder = self.http.get(format!("{}/models", self.base_url));
        if let Some(key) = api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let parsed: ModelListResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .data
            .into_iter()
            .map(|entry| ModelInfo {
                id: entry.id,
                pricing: entry.pricing.map(|p| ModelPricing {
                    prompt: p.prompt,
                    completion: p.completion,
                }),
            })
            .collect())
    }
}
