//! Extract Question use case.
//!
//! Runs the vision step of a capture: one multimodal request turning the
//! photographed frame into a transcript, then the pure parser. A gateway
//! failure here aborts the whole capture (with no question there is nothing
//! to fan out) and surfaces as a single top-level error, never as a
//! per-model status.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use snapquiz_domain::{ExtractedQuestion, Model, PromptTemplate, parse_transcript};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while extracting a question from an image
#[derive(Error, Debug)]
pub enum ExtractQuestionError {
    #[error("Vision extraction failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result of a capture: the raw vision transcript plus the parsed question.
///
/// The transcript is kept so the display layer can show what the vision
/// model actually read.
#[derive(Debug, Clone)]
pub struct CapturedQuestion {
    pub transcript: String,
    pub question: ExtractedQuestion,
}

/// Use case for extracting a question from a captured image.
pub struct ExtractQuestionUseCase {
    gateway: Arc<dyn ChatGateway>,
}

impl ExtractQuestionUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Execute the vision extraction and parse the transcript.
    ///
    /// `image_data` is an opaque data URI (`data:image/...;base64,...`).
    pub async fn execute(
        &self,
        api_key: &str,
        vision_model: &Model,
        image_data: &str,
    ) -> Result<CapturedQuestion, ExtractQuestionError> {
        info!("Extracting question text with {}", vision_model);

        let transcript = self
            .gateway
            .extract_text_from_image(api_key, vision_model, image_data, PromptTemplate::extraction())
            .await?;

        debug!("Vision transcript: {} bytes", transcript.len());

        let question = parse_transcript(&transcript);
        if question.is_detected() {
            info!(
                "Detected a {} question: {}",
                question.kind(),
                question.question()
            );
        } else {
            info!("No question detected in the capture");
        }

        Ok(CapturedQuestion {
            transcript,
            question,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::{ChatMessage, ModelInfo};
    use async_trait::async_trait;

    // ==================== Test Mocks ====================

    struct FixedVisionGateway {
        transcript: Result<String, GatewayError>,
    }

    #[async_trait]
    impl ChatGateway for FixedVisionGateway {
        async fn extract_text_from_image(
            &self,
            _api_key: &str,
            _model: &Model,
            _image_data: &str,
            _prompt: &str,
        ) -> Result<String, GatewayError> {
            match &self.transcript {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(GatewayError::Other(e.to_string())),
            }
        }

        async fn ask_model(
            &self,
            _api_key: &str,
            _model: &Model,
            _system_prompt: Option<&str>,
            _user_prompt: &str,
            _temperature: Option<f32>,
        ) -> Result<String, GatewayError> {
            unimplemented!("not used by this use case")
        }

        async fn ask_model_followup(
            &self,
            _api_key: &str,
            _model: &Model,
            _conversation: &[ChatMessage],
            _temperature: Option<f32>,
        ) -> Result<String, GatewayError> {
            unimplemented!("not used by this use case")
        }

        async fn list_models(
            &self,
            _api_key: Option<&str>,
        ) -> Result<Vec<ModelInfo>, GatewayError> {
            Ok(vec![])
        }
    }

    fn vision_model() -> Model {
        Model::new("google/gemini-2.0-pro-exp-02-05:free")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_transcript_is_parsed() {
        let gateway = Arc::new(FixedVisionGateway {
            transcript: Ok("Question: 2+2?\n".to_string()),
        });
        let captured = ExtractQuestionUseCase::new(gateway)
            .execute("key", &vision_model(), "data:image/jpeg;base64,xyz")
            .await
            .unwrap();

        assert_eq!(captured.transcript, "Question: 2+2?\n");
        assert_eq!(captured.question.question(), "2+2?");
        assert!(!captured.question.is_multiple_choice());
    }

    #[tokio::test]
    async fn test_empty_transcript_yields_sentinel() {
        let gateway = Arc::new(FixedVisionGateway {
            transcript: Ok(String::new()),
        });
        let captured = ExtractQuestionUseCase::new(gateway)
            .execute("key", &vision_model(), "data:image/png;base64,xyz")
            .await
            .unwrap();

        assert!(!captured.question.is_detected());
    }

    #[tokio::test]
    async fn test_gateway_failure_aborts_capture() {
        let gateway = Arc::new(FixedVisionGateway {
            transcript: Err(GatewayError::Transport("unreachable".to_string())),
        });
        let result = ExtractQuestionUseCase::new(gateway)
            .execute("key", &vision_model(), "data:image/png;base64,xyz")
            .await;

        assert!(matches!(
            result,
            Err(ExtractQuestionError::Gateway(GatewayError::Other(_)))
        ));
    }
}
