//! Client for the remote registration orchestrator
//!
//! Two calls, no caching and no retry: begin a conversation, submit a step.

mod error;
mod http;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::{OrchestratorError, OrchestratorErrorKind};
pub use http::HttpOrchestrator;
pub use types::{StartResponse, StepOption, StepRequest, StepResponse};

use async_trait::async_trait;
use std::sync::Arc;

/// Network operations the step driver depends on
#[async_trait]
pub trait OrchestratorClient: Send + Sync {
    /// Create a conversation and return its identity
    async fn start(&self) -> Result<String, OrchestratorError>;

    /// Submit user input for the given step
    async fn submit_step(&self, request: &StepRequest) -> Result<StepResponse, OrchestratorError>;
}

#[async_trait]
impl<T: OrchestratorClient + ?Sized> OrchestratorClient for Arc<T> {
    async fn start(&self) -> Result<String, OrchestratorError> {
        (**self).start().await
    }

    async fn submit_step(&self, request: &StepRequest) -> Result<StepResponse, OrchestratorError> {
        (**self).submit_step(request).await
    }
}

/// Logging wrapper for orchestrator clients
pub struct LoggingOrchestrator<C> {
    inner: C,
}

impl<C: OrchestratorClient> LoggingOrchestrator<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: OrchestratorClient> OrchestratorClient for LoggingOrchestrator<C> {
    async fn start(&self) -> Result<String, OrchestratorError> {
        let start = std::time::Instant::now();
        let result = self.inner.start().await;
        let duration = start.elapsed();

        match &result {
            Ok(conversation_id) => {
                tracing::info!(
                    conversation_id = %conversation_id,
                    duration_ms = %duration.as_millis(),
                    "Conversation started"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    "Conversation start failed"
                );
            }
        }

        result
    }

    async fn submit_step(&self, request: &StepRequest) -> Result<StepResponse, OrchestratorError> {
        let start = std::time::Instant::now();
        let result = self.inner.submit_step(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    conversation_id = %request.conversation_id,
                    step = %request.current_step,
                    duration_ms = %duration.as_millis(),
                    next_step = ?response.next_step,
                    rejected = response.error.is_some(),
                    "Step submitted"
                );
                if let Some(error_step) = &response.error_step {
                    tracing::debug!(error_step = %error_step, "Orchestrator rejected input");
                }
                if let Some(message) = &response.message {
                    tracing::debug!(message = %message, "Orchestrator status message");
                }
            }
            Err(e) => {
                tracing::error!(
                    conversation_id = %request.conversation_id,
                    step = %request.current_step,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    "Step submission failed"
                );
            }
        }

        result
    }
}
