//! Captured question types and transcript parsing

pub mod entities;
pub mod parsing;

pub use entities::{AnswerKind, ExtractedQuestion, NO_QUESTION_DETECTED};
pub use parsing::parse_transcript;
