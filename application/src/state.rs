//! Shared results state.
//!
//! [`ResultsStore`] is the single shared mutable resource in the system: the
//! published [`ResultBatch`] reference plus the generation counter that ties
//! every batch to the capture that started it. It replaces the source of
//! truth a UI store would hold, passed explicitly instead of living in a
//! module global.
//!
//! Commits are read-snapshot, mutate-one-slot, replace-reference under a
//! single lock acquisition, so an observer can never see a half-applied
//! update. A commit tagged with a superseded generation is dropped; late
//! results from an abandoned capture never leak into a newer batch.

use snapquiz_domain::{AnswerStatus, Model, ResultBatch};
use std::sync::{Arc, Mutex};

struct Published {
    generation: u64,
    batch: Arc<ResultBatch>,
}

/// Owner of the published batch reference.
pub struct ResultsStore {
    inner: Mutex<Published>,
}

impl ResultsStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Published {
                generation: 0,
                batch: Arc::new(ResultBatch::empty(0)),
            }),
        }
    }

    /// Start a new batch for the given models.
    ///
    /// Bumps the generation (superseding any in-flight batch) and publishes
    /// a fresh all-`Processing` snapshot. Returns the generation tag the
    /// caller must present when committing slots.
    pub fn begin_batch(&self, models: &[Model]) -> (u64, Arc<ResultBatch>) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.batch = Arc::new(ResultBatch::start(inner.generation, models));
        (inner.generation, Arc::clone(&inner.batch))
    }

    /// Commit one slot's terminal status.
    ///
    /// Returns the republished snapshot, or `None` when the commit was
    /// dropped: a stale generation, or a slot that cannot accept the
    /// transition.
    pub fn commit_slot(
        &self,
        generation: u64,
        index: usize,
        status: AnswerStatus,
    ) -> Option<Arc<ResultBatch>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            return None;
        }
        let mut batch = (*inner.batch).clone();
        batch.complete_slot(index, status).ok()?;
        inner.batch = Arc::new(batch);
        Some(Arc::clone(&inner.batch))
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<ResultBatch> {
        Arc::clone(&self.inner.lock().unwrap().batch)
    }

    /// Discard the current batch, superseding any in-flight commits.
    pub fn clear(&self) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.batch = Arc::new(ResultBatch::empty(inner.generation));
        inner.generation
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().unwrap().generation
    }
}

impl Default for ResultsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(n: usize) -> Vec<Model> {
        (0..n).map(|i| Model::new(format!("vendor/m{i}"))).collect()
    }

    #[test]
    fn test_begin_batch_publishes_processing_snapshot() {
        let store = ResultsStore::new();
        let (generation, snapshot) = store.begin_batch(&models(2));

        assert_eq!(generation, 1);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_complete());
        assert_eq!(store.snapshot().generation(), 1);
    }

    #[test]
    fn test_commit_replaces_published_reference() {
        let store = ResultsStore::new();
        let (generation, before) = store.begin_batch(&models(2));

        let after = store
            .commit_slot(generation, 0, AnswerStatus::answered("4", 0.3))
            .unwrap();

        // The old snapshot is untouched; the published reference is new.
        assert_eq!(before.slots()[0].status, AnswerStatus::Processing);
        assert_eq!(after.slots()[0].status, AnswerStatus::answered("4", 0.3));
        assert_eq!(store.snapshot().slots()[0].status, after.slots()[0].status);
    }

    #[test]
    fn test_stale_generation_commit_is_dropped() {
        let store = ResultsStore::new();
        let (old_generation, _) = store.begin_batch(&models(2));
        let (new_generation, _) = store.begin_batch(&models(2));

        let dropped = store.commit_slot(old_generation, 0, AnswerStatus::answered("A", 0.1));
        assert!(dropped.is_none());

        // The newer batch is untouched by the stale commit.
        let snapshot = store.snapshot();
        assert_eq!(snapshot.generation(), new_generation);
        assert_eq!(snapshot.slots()[0].status, AnswerStatus::Processing);
    }

    #[test]
    fn test_clear_supersedes_in_flight_batch() {
        let store = ResultsStore::new();
        let (generation, _) = store.begin_batch(&models(1));

        let cleared = store.clear();
        assert!(cleared > generation);
        assert!(store.snapshot().is_empty());

        assert!(
            store
                .commit_slot(generation, 0, AnswerStatus::answered("A", 0.1))
                .is_none()
        );
    }

    #[test]
    fn test_double_commit_same_slot_is_dropped() {
        let store = ResultsStore::new();
        let (generation, _) = store.begin_batch(&models(1));

        store
            .commit_slot(generation, 0, AnswerStatus::answered("A", 0.1))
            .unwrap();
        let second = store.commit_slot(generation, 0, AnswerStatus::error("late", None));
        assert!(second.is_none());
        assert_eq!(
            store.snapshot().slots()[0].status,
            AnswerStatus::answered("A", 0.1)
        );
    }
}
