//! Orchestrator client error types

use thiserror::Error;

/// Transport or decoding failure talking to the orchestrator
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct OrchestratorError {
    pub kind: OrchestratorErrorKind,
    pub message: String,
}

impl OrchestratorError {
    pub fn new(kind: OrchestratorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn start_failed(message: impl Into<String>) -> Self {
        Self::new(OrchestratorErrorKind::StartFailed, message)
    }

    pub fn submit_failed(message: impl Into<String>) -> Self {
        Self::new(OrchestratorErrorKind::SubmitFailed, message)
    }
}

/// Which call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrchestratorErrorKind {
    /// `POST /start` failed; the conversation is unusable
    #[error("start failed")]
    StartFailed,
    /// `POST /process` failed; the step may be retried
    #[error("submit failed")]
    SubmitFailed,
}
