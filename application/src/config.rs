//! Application-level configuration.
//!
//! This module provides the parameters that control the per-model answer
//! loop: the retry budget, backoff, request temperatures, and the
//! per-attempt timeout.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Answer-loop control parameters.
///
/// The retry budget counts *additional* attempts: `max_retries = 2` means
/// three dispatches at most. The repair turn runs colder than the initial
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Retries after the initial attempt.
    pub max_retries: usize,
    /// Fixed pause between attempts.
    pub retry_backoff: Duration,
    /// Temperature for the initial answer request.
    pub temperature: f32,
    /// Temperature for the repair sub-dialogue.
    pub repair_temperature: f32,
    /// Maximum time to wait for a single gateway call; `None` disables the
    /// limit and leaves only the transport's own behavior.
    pub attempt_timeout: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_backoff: Duration::from_secs(1),
            temperature: 0.2,
            repair_temperature: 0.1,
            attempt_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: usize) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Total dispatches the budget allows.
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_retries, 2);
        assert_eq!(params.max_attempts(), 3);
        assert_eq!(params.retry_backoff, Duration::from_secs(1));
        assert!(params.attempt_timeout.is_some());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_retries(0)
            .with_retry_backoff(Duration::from_millis(50))
            .with_attempt_timeout(None);

        assert_eq!(params.max_attempts(), 1);
        assert_eq!(params.retry_backoff, Duration::from_millis(50));
        assert!(params.attempt_timeout.is_none());
    }
}
