//! Application layer for snapquiz
//!
//! This crate defines the ports (interfaces to the outside world) and the
//! use cases that orchestrate the capture-and-answer flow: question
//! extraction, the per-model retry/repair state machine, and the concurrent
//! fan-out that aggregates per-model results into a live batch.

pub mod config;
pub mod ports;
pub mod state;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::batch_observer::{BatchObserver, NoObserver};
pub use ports::chat_gateway::{
    ChatGateway, ChatMessage, ChatRole, GatewayError, ModelInfo, ModelPricing,
};
pub use state::ResultsStore;
pub use use_cases::answer_question::AnswerQuestionUseCase;
pub use use_cases::extract_question::{
    CapturedQuestion, ExtractQuestionError, ExtractQuestionUseCase,
};
pub use use_cases::gather_answers::{
    GatherAnswersError, GatherAnswersInput, GatherAnswersUseCase,
};
