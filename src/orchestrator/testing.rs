//! Mock orchestrator for driver and app tests

use super::{OrchestratorClient, OrchestratorError, StepRequest, StepResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock orchestrator that returns queued results
#[allow(dead_code)]
pub struct MockOrchestrator {
    starts: Mutex<VecDeque<Result<String, OrchestratorError>>>,
    steps: Mutex<VecDeque<Result<StepResponse, OrchestratorError>>>,
    /// Record of all step submissions
    pub requests: Mutex<Vec<StepRequest>>,
    /// Number of `start` calls made
    pub start_calls: Mutex<usize>,
}

#[allow(dead_code)]
impl MockOrchestrator {
    pub fn new() -> Self {
        Self {
            starts: Mutex::new(VecDeque::new()),
            steps: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            start_calls: Mutex::new(0),
        }
    }

    /// Mock whose `start` succeeds with the given identity
    pub fn started(conversation_id: &str) -> Self {
        let mock = Self::new();
        mock.queue_start(Ok(conversation_id.to_string()));
        mock
    }

    pub fn queue_start(&self, result: Result<String, OrchestratorError>) {
        self.starts.lock().unwrap().push_back(result);
    }

    pub fn queue_step(&self, result: Result<StepResponse, OrchestratorError>) {
        self.steps.lock().unwrap().push_back(result);
    }

    pub fn queue_response(&self, response: StepResponse) {
        self.queue_step(Ok(response));
    }

    pub fn recorded_requests(&self) -> Vec<StepRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn start_count(&self) -> usize {
        *self.start_calls.lock().unwrap()
    }
}

impl Default for MockOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrchestratorClient for MockOrchestrator {
    async fn start(&self) -> Result<String, OrchestratorError> {
        *self.start_calls.lock().unwrap() += 1;
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OrchestratorError::start_failed("No mock start queued")))
    }

    async fn submit_step(&self, request: &StepRequest) -> Result<StepResponse, OrchestratorError> {
        self.requests.lock().unwrap().push(request.clone());
        self.steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OrchestratorError::submit_failed("No mock response queued")))
    }
}
