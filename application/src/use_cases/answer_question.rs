//! Answer Question use case.
//!
//! Drives exactly one model from prompt to a terminal [`AnswerStatus`],
//! enforcing the bounded retry/repair protocol:
//!
//! - a failed request is retried after a fixed backoff until the attempt
//!   budget runs out, then surfaces as a terminal error;
//! - a well-formed but invalid answer first gets one repair sub-dialogue
//!   (a follow-up turn quoting the invalid answer and restating the output
//!   contract) before the loop falls back to a plain retry;
//! - an exhausted budget without a valid answer ends in the placeholder
//!   labels "Invalid response" / "Unknown" rather than a structured error.
//!
//! Attempts within one model are strictly sequential: never more than one
//! in-flight call per model.

use crate::config::ExecutionParams;
use crate::ports::chat_gateway::{ChatGateway, ChatMessage, GatewayError};
use snapquiz_domain::{
    AnswerKind, AnswerStatus, ExtractedQuestion, Model, PromptTemplate, format_answer,
    validate_answer,
};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, warn};

/// Terminal label for a multiple-choice slot whose attempts ran out.
const EXHAUSTED_CHOICE_LABEL: &str = "Invalid response";

/// Terminal label for a free-form slot whose attempts ran out.
const EXHAUSTED_FREE_FORM_LABEL: &str = "Unknown";

/// Use case for answering one question with one model.
pub struct AnswerQuestionUseCase {
    gateway: Arc<dyn ChatGateway>,
    params: ExecutionParams,
}

impl AnswerQuestionUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, params: ExecutionParams) -> Self {
        Self { gateway, params }
    }

    /// Run the retry/repair loop to a terminal status.
    ///
    /// Never fails: every outcome (answer, provider failure, exhausted
    /// budget) is a displayable terminal [`AnswerStatus`].
    pub async fn execute(
        &self,
        api_key: &str,
        model: &Model,
        question: &ExtractedQuestion,
    ) -> AnswerStatus {
        let kind = question.kind();
        let prompt = match kind {
            AnswerKind::MultipleChoice => {
                PromptTemplate::multiple_choice(question.question(), question.options())
            }
            AnswerKind::FreeForm => PromptTemplate::free_form(question.question()),
        };

        let started = Instant::now();

        for attempt in 0..=self.params.max_retries {
            match self.dispatch(api_key, model, &prompt).await {
                Ok(answer) => {
                    if validate_answer(&answer, kind) {
                        let elapsed = started.elapsed().as_secs_f64();
                        info!(
                            "{} answered after {} attempt(s) in {:.2}s",
                            model,
                            attempt + 1,
                            elapsed
                        );
                        return AnswerStatus::answered(format_answer(&answer, kind), elapsed);
                    }

                    debug!(
                        "{} gave an invalid {} answer on attempt {}",
                        model,
                        kind,
                        attempt + 1
                    );

                    if attempt < self.params.max_retries {
                        sleep(self.params.retry_backoff).await;

                        if let Some(fixed) = self.repair(api_key, model, &prompt, &answer, kind).await
                        {
                            let elapsed = started.elapsed().as_secs_f64();
                            info!("{} recovered via repair in {:.2}s", model, elapsed);
                            return AnswerStatus::answered(format_answer(&fixed, kind), elapsed);
                        }

                        sleep(self.params.retry_backoff).await;
                    }
                }
                Err(e) => {
                    if attempt < self.params.max_retries {
                        warn!("{} attempt {} failed: {}", model, attempt + 1, e);
                        sleep(self.params.retry_backoff).await;
                    } else {
                        warn!("{} failed after {} attempts: {}", model, attempt + 1, e);
                        return AnswerStatus::error(
                            e.to_string(),
                            Some(started.elapsed().as_secs_f64()),
                        );
                    }
                }
            }
        }

        warn!("{} exhausted its attempt budget without a valid answer", model);
        let label = match kind {
            AnswerKind::MultipleChoice => EXHAUSTED_CHOICE_LABEL,
            AnswerKind::FreeForm => EXHAUSTED_FREE_FORM_LABEL,
        };
        AnswerStatus::error(label, Some(started.elapsed().as_secs_f64()))
    }

    /// One answer request at the configured (low) temperature.
    async fn dispatch(
        &self,
        api_key: &str,
        model: &Model,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        self.bounded(self.gateway.ask_model(
            api_key,
            model,
            Some(PromptTemplate::answer_system()),
            prompt,
            Some(self.params.temperature),
        ))
        .await
    }

    /// One repair sub-dialogue: original prompt, the invalid answer, and a
    /// corrective instruction. Returns the repaired answer only when it
    /// validates; transport errors here are swallowed so the plain retry
    /// still runs.
    async fn repair(
        &self,
        api_key: &str,
        model: &Model,
        prompt: &str,
        invalid_answer: &str,
        kind: AnswerKind,
    ) -> Option<String> {
        let correction = match kind {
            AnswerKind::MultipleChoice => PromptTemplate::multiple_choice_repair(invalid_answer),
            AnswerKind::FreeForm => PromptTemplate::free_form_repair(invalid_answer),
        };

        let conversation = vec![
            ChatMessage::system(PromptTemplate::repair_system()),
            ChatMessage::user(prompt),
            ChatMessage::assistant(invalid_answer),
            ChatMessage::user(correction),
        ];

        match self
            .bounded(self.gateway.ask_model_followup(
                api_key,
                model,
                &conversation,
                Some(self.params.repair_temperature),
            ))
            .await
        {
            Ok(fixed) if validate_answer(&fixed, kind) => Some(fixed),
            Ok(_) => {
                debug!("{} repair answer still invalid", model);
                None
            }
            Err(e) => {
                debug!("{} repair attempt failed: {}", model, e);
                None
            }
        }
    }

    /// Apply the per-attempt timeout, mapping expiry to a gateway error so a
    /// stalled request cannot hold its slot open forever.
    async fn bounded<F>(&self, call: F) -> Result<String, GatewayError>
    where
        F: Future<Output = Result<String, GatewayError>>,
    {
        match self.params.attempt_timeout {
            Some(limit) => timeout(limit, call)
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => call.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::ModelInfo;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Scripted gateway: each `ask_model`/`ask_model_followup` call pops the
    /// next scripted reply.
    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        followup_replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(
            replies: Vec<Result<String, GatewayError>>,
            followup_replies: Vec<Result<String, GatewayError>>,
        ) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                followup_replies: Mutex::new(VecDeque::from(followup_replies)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatGateway for ScriptedGateway {
        async fn extract_text_from_image(
            &self,
            _api_key: &str,
            _model: &Model,
            _image_data: &str,
            _prompt: &str,
        ) -> Result<String, GatewayError> {
            unimplemented!("not used by this use case")
        }

        async fn ask_model(
            &self,
            _api_key: &str,
            _model: &Model,
            _system_prompt: Option<&str>,
            _user_prompt: &str,
            _temperature: Option<f32>,
        ) -> Result<String, GatewayError> {
            self.calls.lock().unwrap().push("ask".to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::Other("script exhausted".to_string())))
        }

        async fn ask_model_followup(
            &self,
            _api_key: &str,
            _model: &Model,
            conversation: &[ChatMessage],
            _temperature: Option<f32>,
        ) -> Result<String, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("followup:{}", conversation.len()));
            self.followup_replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::Other("script exhausted".to_string())))
        }

        async fn list_models(
            &self,
            _api_key: Option<&str>,
        ) -> Result<Vec<ModelInfo>, GatewayError> {
            Ok(vec![])
        }
    }

    /// Gateway whose answer calls never resolve.
    struct HangingGateway;

    #[async_trait]
    impl ChatGateway for HangingGateway {
        async fn extract_text_from_image(
            &self,
            _api_key: &str,
            _model: &Model,
            _image_data: &str,
            _prompt: &str,
        ) -> Result<String, GatewayError> {
            unimplemented!("not used by this use case")
        }

        async fn ask_model(
            &self,
            _api_key: &str,
            _model: &Model,
            _system_prompt: Option<&str>,
            _user_prompt: &str,
            _temperature: Option<f32>,
        ) -> Result<String, GatewayError> {
            std::future::pending().await
        }

        async fn ask_model_followup(
            &self,
            _api_key: &str,
            _model: &Model,
            _conversation: &[ChatMessage],
            _temperature: Option<f32>,
        ) -> Result<String, GatewayError> {
            std::future::pending().await
        }

        async fn list_models(
            &self,
            _api_key: Option<&str>,
        ) -> Result<Vec<ModelInfo>, GatewayError> {
            Ok(vec![])
        }
    }

    fn mcq_question() -> ExtractedQuestion {
        ExtractedQuestion::new("Capital of France?", "A. Paris\nB. London\nC. Rome\nD. Bern")
    }

    fn free_form_question() -> ExtractedQuestion {
        ExtractedQuestion::new("2+2?", "")
    }

    fn model() -> Model {
        Model::new("vendor/test-model")
    }

    fn use_case(gateway: Arc<dyn ChatGateway>) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::new(gateway, ExecutionParams::default())
    }

    // ==================== Happy paths ====================

    #[tokio::test(start_paused = true)]
    async fn test_valid_first_answer_is_formatted() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("(a).".to_string())], vec![]));
        let status = use_case(gateway.clone())
            .execute("key", &model(), &mcq_question())
            .await;

        match status {
            AnswerStatus::Answered { text, .. } => assert_eq!(text, "A"),
            other => panic!("expected Answered, got {other:?}"),
        }
        assert_eq!(gateway.calls(), vec!["ask"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_numeric_free_form_answer_unmutated() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("4".to_string())], vec![]));
        let status = use_case(gateway)
            .execute("key", &model(), &free_form_question())
            .await;

        match status {
            AnswerStatus::Answered { text, .. } => assert_eq!(text, "4"),
            other => panic!("expected Answered, got {other:?}"),
        }
    }

    // ==================== Repair path ====================

    #[tokio::test(start_paused = true)]
    async fn test_repair_recovers_invalid_answer() {
        let gateway = Arc::new(ScriptedGateway::new(
            vec![Ok("The answer is definitely B".to_string())],
            vec![Ok("B".to_string())],
        ));
        let status = use_case(gateway.clone())
            .execute("key", &model(), &mcq_question())
            .await;

        match status {
            AnswerStatus::Answered { text, .. } => assert_eq!(text, "B"),
            other => panic!("expected Answered, got {other:?}"),
        }
        // One initial ask, then a four-turn repair conversation; no retry.
        assert_eq!(gateway.calls(), vec!["ask", "followup:4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_repair_falls_back_to_retry() {
        let gateway = Arc::new(ScriptedGateway::new(
            vec![Ok("not a letter".to_string()), Ok("C".to_string())],
            vec![Err(GatewayError::Transport("reset".to_string()))],
        ));
        let status = use_case(gateway.clone())
            .execute("key", &model(), &mcq_question())
            .await;

        match status {
            AnswerStatus::Answered { text, .. } => assert_eq!(text, "C"),
            other => panic!("expected Answered, got {other:?}"),
        }
        assert_eq!(gateway.calls(), vec!["ask", "followup:4", "ask"]);
    }

    // ==================== Exhausted budgets ====================

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_exhausts_budget_with_backoff() {
        let failure = || Err(GatewayError::Transport("connection refused".to_string()));
        let gateway = Arc::new(ScriptedGateway::new(
            vec![failure(), failure(), failure()],
            vec![],
        ));

        let started = Instant::now();
        let status = use_case(gateway.clone())
            .execute("key", &model(), &mcq_question())
            .await;

        match status {
            AnswerStatus::Error {
                message,
                elapsed_secs,
            } => {
                assert!(message.contains("connection refused"));
                assert!(elapsed_secs.unwrap() >= 2.0);
            }
            other => panic!("expected Error, got {other:?}"),
        }

        // Exactly 3 attempts (1 initial + 2 retries), >= 1s backoff between.
        assert_eq!(gateway.calls(), vec!["ask", "ask", "ask"]);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_invalid_mcq_uses_placeholder() {
        let invalid = || Ok("no letter here at all".to_string());
        let gateway = Arc::new(ScriptedGateway::new(
            vec![invalid(), invalid(), invalid()],
            vec![invalid(), invalid()],
        ));
        let status = use_case(gateway)
            .execute("key", &model(), &mcq_question())
            .await;

        match status {
            AnswerStatus::Error { message, .. } => assert_eq!(message, "Invalid response"),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_invalid_free_form_uses_placeholder() {
        let verbose = || {
            Ok("this answer rambles on and on and on and with far too many words to ever pass \
                the brevity validation rule here"
                .to_string())
        };
        let gateway = Arc::new(ScriptedGateway::new(
            vec![verbose(), verbose(), verbose()],
            vec![verbose(), verbose()],
        ));
        let status = use_case(gateway)
            .execute("key", &model(), &free_form_question())
            .await;

        match status {
            AnswerStatus::Error { message, .. } => assert_eq!(message, "Unknown"),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    // ==================== Timeout ====================

    #[tokio::test(start_paused = true)]
    async fn test_stalled_request_times_out_per_attempt() {
        let params = ExecutionParams::default()
            .with_attempt_timeout(Some(Duration::from_secs(5)));
        let use_case = AnswerQuestionUseCase::new(Arc::new(HangingGateway), params);

        let status = use_case
            .execute("key", &model(), &free_form_question())
            .await;

        match status {
            AnswerStatus::Error { message, .. } => {
                assert_eq!(message, GatewayError::Timeout.to_string());
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }
}
