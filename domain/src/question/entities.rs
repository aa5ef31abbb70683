//! Extracted question value objects

use serde::{Deserialize, Serialize};

/// Sentinel question text published when a capture contained no question.
///
/// Consumers must treat a question carrying this text as "do not fan out".
pub const NO_QUESTION_DETECTED: &str = "No question detected.";

/// How a question expects to be answered.
///
/// Derived solely from the presence of an options block; no other signal
/// determines the question kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// Answered with a single letter A-D.
    MultipleChoice,
    /// Answered with a short free-form phrase.
    FreeForm,
}

impl std::fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerKind::MultipleChoice => write!(f, "multiple-choice"),
            AnswerKind::FreeForm => write!(f, "free-form"),
        }
    }
}

/// A question recovered from a vision-model transcript (Value Object)
///
/// Created once per capture, immutable, and replaced wholesale by the next
/// capture or an explicit clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedQuestion {
    question: String,
    options: String,
}

impl ExtractedQuestion {
    pub fn new(question: impl Into<String>, options: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options: options.into(),
        }
    }

    /// The sentinel value for a capture in which no question was found.
    pub fn no_question() -> Self {
        Self {
            question: NO_QUESTION_DETECTED.to_string(),
            options: String::new(),
        }
    }

    /// The question text, or [`NO_QUESTION_DETECTED`].
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The raw multi-line options block; empty for free-form questions.
    pub fn options(&self) -> &str {
        &self.options
    }

    /// Whether an actual question was detected in the capture.
    pub fn is_detected(&self) -> bool {
        self.question != NO_QUESTION_DETECTED
    }

    pub fn is_multiple_choice(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn kind(&self) -> AnswerKind {
        if self.is_multiple_choice() {
            AnswerKind::MultipleChoice
        } else {
            AnswerKind::FreeForm
        }
    }

    /// Question and options joined for display.
    pub fn display_text(&self) -> String {
        if self.is_multiple_choice() {
            format!("{}\n{}", self.question, self.options)
        } else {
            self.question.clone()
        }
    }
}

impl std::fmt::Display for ExtractedQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}
