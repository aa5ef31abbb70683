//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid model identifier: {0:?}")]
    InvalidModel(String),

    #[error("Batch slot {index} is out of range (batch has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("Batch slot {index} already holds a terminal result")]
    SlotAlreadyTerminal { index: usize },

    #[error("Batch slots can only transition to a terminal status")]
    NotTerminal,
}
