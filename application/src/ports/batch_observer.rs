//! Batch observation port
//!
//! Defines the interface for publishing incremental batch snapshots while a
//! fan-out is running.

use snapquiz_domain::ResultBatch;

/// Callback for batch updates during answer gathering
///
/// Implementations live in the presentation layer (console progress bars,
/// plain text, a UI). Every callback receives a full batch snapshot;
/// observers never see partial mutations.
pub trait BatchObserver: Send + Sync {
    /// Called once with the all-`Processing` batch before any model answers.
    fn on_batch_start(&self, batch: &ResultBatch);

    /// Called each time one slot reaches its terminal state.
    fn on_slot_update(&self, batch: &ResultBatch, index: usize);

    /// Called once every slot is terminal.
    fn on_batch_complete(&self, batch: &ResultBatch);
}

/// No-op observer for when nothing watches the batch
pub struct NoObserver;

impl BatchObserver for NoObserver {
    fn on_batch_start(&self, _batch: &ResultBatch) {}
    fn on_slot_update(&self, _batch: &ResultBatch, _index: usize) {}
    fn on_batch_complete(&self, _batch: &ResultBatch) {}
}
