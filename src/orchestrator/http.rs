//! HTTP implementation of the orchestrator client

use super::types::{ErrorBody, StartResponse};
use super::{OrchestratorClient, OrchestratorError, StepRequest, StepResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Talks to the orchestrator's `/start` and `/process` endpoints
pub struct HttpOrchestrator {
    client: Client,
    start_url: String,
    process_url: String,
}

impl HttpOrchestrator {
    /// Build a client for the service at `base_url`.
    ///
    /// With no timeout, a hung request is awaited indefinitely.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client,
            start_url: format!("{base}/start"),
            process_url: format!("{base}/process"),
        })
    }

    fn describe_failure(status: StatusCode, body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => format!("HTTP {status}: {}", err.detail),
            Err(_) => format!("HTTP {status}: {body}"),
        }
    }

    fn describe_send_error(e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("Request timeout: {e}")
        } else if e.is_connect() {
            format!("Connection failed: {e}")
        } else {
            format!("Request failed: {e}")
        }
    }
}

#[async_trait]
impl OrchestratorClient for HttpOrchestrator {
    async fn start(&self) -> Result<String, OrchestratorError> {
        let response = self
            .client
            .post(&self.start_url)
            .send()
            .await
            .map_err(|e| OrchestratorError::start_failed(Self::describe_send_error(&e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            OrchestratorError::start_failed(format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(OrchestratorError::start_failed(Self::describe_failure(
                status, &body,
            )));
        }

        let started: StartResponse = serde_json::from_str(&body).map_err(|e| {
            OrchestratorError::start_failed(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(started.conversation_id)
    }

    async fn submit_step(&self, request: &StepRequest) -> Result<StepResponse, OrchestratorError> {
        let response = self
            .client
            .post(&self.process_url)
            .json(request)
            .send()
            .await
            .map_err(|e| OrchestratorError::submit_failed(Self::describe_send_error(&e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            OrchestratorError::submit_failed(format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(OrchestratorError::submit_failed(Self::describe_failure(
                status, &body,
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            OrchestratorError::submit_failed(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}
