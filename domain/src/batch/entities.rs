//! Result batch entities - per-model outcomes for one capture.
//!
//! A [`ResultBatch`] is the ordered collection published to the display
//! layer: one [`ModelResult`] per selected model, index-aligned with the
//! selection order at batch start. Slots start in
//! [`AnswerStatus::Processing`] and move to exactly one terminal state.

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Outcome of one model's orchestration.
///
/// A tagged union instead of the magic status strings
/// ("Processing...", "Error: ...") a UI would otherwise have to sniff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnswerStatus {
    /// Dispatched, no terminal result yet.
    Processing,
    /// A validated, canonically formatted answer.
    Answered { text: String, elapsed_secs: f64 },
    /// A terminal failure or exhausted-attempts placeholder.
    ///
    /// `elapsed_secs` is present when the error came out of a completed
    /// attempt sequence.
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        elapsed_secs: Option<f64>,
    },
}

impl AnswerStatus {
    pub fn answered(text: impl Into<String>, elapsed_secs: f64) -> Self {
        AnswerStatus::Answered {
            text: text.into(),
            elapsed_secs,
        }
    }

    pub fn error(message: impl Into<String>, elapsed_secs: Option<f64>) -> Self {
        AnswerStatus::Error {
            message: message.into(),
            elapsed_secs,
        }
    }

    /// Whether this status ends the slot's lifecycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnswerStatus::Processing)
    }
}

/// One model's slot in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub model: Model,
    pub status: AnswerStatus,
}

impl ModelResult {
    fn processing(model: Model) -> Self {
        Self {
            model,
            status: AnswerStatus::Processing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Ordered per-model results for one capture (Entity)
///
/// The slot count and order are fixed at batch start; completion order never
/// reorders slots. The generation tag identifies which capture the batch
/// belongs to, so results from a superseded capture can be recognized and
/// dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBatch {
    generation: u64,
    slots: Vec<ModelResult>,
}

impl ResultBatch {
    /// Create a batch with every slot in `Processing` state.
    pub fn start(generation: u64, models: &[Model]) -> Self {
        Self {
            generation,
            slots: models
                .iter()
                .cloned()
                .map(ModelResult::processing)
                .collect(),
        }
    }

    /// An empty batch, used as the cleared/initial published state.
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            slots: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slots(&self) -> &[ModelResult] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Move one slot to its terminal status.
    ///
    /// Transitions are monotonic: a slot accepts exactly one terminal status
    /// and never leaves it, and `Processing` is not a valid target.
    pub fn complete_slot(&mut self, index: usize, status: AnswerStatus) -> Result<(), DomainError> {
        if !status.is_terminal() {
            return Err(DomainError::NotTerminal);
        }
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(DomainError::SlotOutOfRange { index, len })?;
        if slot.is_terminal() {
            return Err(DomainError::SlotAlreadyTerminal { index });
        }
        slot.status = status;
        Ok(())
    }

    /// Whether every slot has reached a terminal state.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(ModelResult::is_terminal)
    }
}
