//! Gather Answers use case.
//!
//! Fans the per-model answer orchestration out across every selected model
//! and publishes incremental snapshots as slots complete. Failure isolation
//! is a hard invariant: one model's terminal error never cancels or delays a
//! sibling's orchestration.

use crate::config::ExecutionParams;
use crate::ports::batch_observer::BatchObserver;
use crate::ports::chat_gateway::ChatGateway;
use crate::state::ResultsStore;
use crate::use_cases::answer_question::AnswerQuestionUseCase;
use snapquiz_domain::{ExtractedQuestion, Model, ResultBatch};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur when starting a fan-out
#[derive(Error, Debug)]
pub enum GatherAnswersError {
    #[error("No models selected")]
    NoModels,

    #[error("No question detected; nothing to answer")]
    NoQuestion,
}

/// Input for the [`GatherAnswersUseCase`]
#[derive(Debug, Clone)]
pub struct GatherAnswersInput {
    /// The question to fan out.
    pub question: ExtractedQuestion,
    /// Selected models; slot order follows this order.
    pub models: Vec<Model>,
    /// Provider credential, passed through to every request.
    pub api_key: String,
    /// Retry/backoff/timeout parameters shared by every orchestration.
    pub params: ExecutionParams,
}

impl GatherAnswersInput {
    pub fn new(question: ExtractedQuestion, models: Vec<Model>, api_key: impl Into<String>) -> Self {
        Self {
            question,
            models,
            api_key: api_key.into(),
            params: ExecutionParams::default(),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for answering one question with every selected model at once.
pub struct GatherAnswersUseCase {
    gateway: Arc<dyn ChatGateway>,
    store: Arc<ResultsStore>,
}

impl GatherAnswersUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, store: Arc<ResultsStore>) -> Self {
        Self { gateway, store }
    }

    /// Run the fan-out to completion.
    ///
    /// Publishes the all-`Processing` batch immediately, commits each slot by
    /// its original index as orchestrations finish in arbitrary order, and
    /// returns the completed batch. If a newer capture supersedes this one
    /// mid-flight, the published store stops reflecting these commits but
    /// the returned batch is still this run's own complete result.
    pub async fn execute(
        &self,
        input: GatherAnswersInput,
        observer: &dyn BatchObserver,
    ) -> Result<ResultBatch, GatherAnswersError> {
        if input.models.is_empty() {
            return Err(GatherAnswersError::NoModels);
        }
        if !input.question.is_detected() {
            return Err(GatherAnswersError::NoQuestion);
        }

        info!(
            "Gathering answers from {} model(s) for a {} question",
            input.models.len(),
            input.question.kind()
        );

        let (generation, initial) = self.store.begin_batch(&input.models);
        observer.on_batch_start(&initial);

        // This run's own copy; authoritative for the return value even when
        // a newer capture supersedes the published reference mid-flight.
        let mut batch = (*initial).clone();

        let question = Arc::new(input.question);
        let mut join_set = JoinSet::new();

        for (index, model) in input.models.iter().enumerate() {
            let orchestrator =
                AnswerQuestionUseCase::new(Arc::clone(&self.gateway), input.params.clone());
            let api_key = input.api_key.clone();
            let model = model.clone();
            let question = Arc::clone(&question);

            join_set.spawn(async move {
                let status = orchestrator.execute(&api_key, &model, &question).await;
                (index, model, status)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, model, status)) => {
                    debug!("{} reached a terminal state", model);
                    if let Err(e) = batch.complete_slot(index, status.clone()) {
                        warn!("Dropping result for {}: {}", model, e);
                        continue;
                    }
                    match self.store.commit_slot(generation, index, status) {
                        Some(snapshot) => observer.on_slot_update(&snapshot, index),
                        None => debug!(
                            "Batch {} superseded; not publishing late result for {}",
                            generation, model
                        ),
                    }
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        observer.on_batch_complete(&batch);
        info!("Batch {} complete", generation);

        Ok(batch)
    }
}
