//! Mock embedded runner for testing.

use crate::error::{HarnessError, Result};
use crate::tools::runner::{EmbeddedRunner, RunnerOutcome, RunnerRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock embedded runner with scripted outcomes and recorded requests.
///
/// Outcomes are consumed in FIFO order; when the script is exhausted the
/// default outcome is used, and without one the execution fails.
#[derive(Debug, Clone, Default)]
pub struct MockEmbeddedRunner {
    outcomes: Arc<Mutex<VecDeque<RunnerOutcome>>>,
    default_outcome: Arc<Mutex<Option<RunnerOutcome>>>,
    requests: Arc<Mutex<Vec<RunnerRequest>>>,
}

impl MockEmbeddedRunner {
    /// Creates a mock with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose every execution passes with empty output.
    pub fn succeeding() -> Self {
        let runner = Self::new();
        runner.set_default_outcome(RunnerOutcome {
            output: String::new(),
            failure: None,
        });
        runner
    }

    /// Queues one scripted outcome.
    pub fn enqueue_outcome(&self, outcome: RunnerOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Sets the outcome used once the script is exhausted.
    pub fn set_default_outcome(&self, outcome: RunnerOutcome) {
        *self.default_outcome.lock().unwrap() = Some(outcome);
    }

    /// Returns every request received, in order.
    pub fn requests(&self) -> Vec<RunnerRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl EmbeddedRunner for MockEmbeddedRunner {
    fn execute(&self, request: &RunnerRequest) -> Result<RunnerOutcome> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(outcome) = self.outcomes.lock().unwrap().pop_front() {
            return Ok(outcome);
        }
        if let Some(default) = self.default_outcome.lock().unwrap().clone() {
            return Ok(default);
        }
        Err(HarnessError::InvalidConfiguration(
            "no outcome scripted for embedded execution".to_string(),
        ))
    }
}
