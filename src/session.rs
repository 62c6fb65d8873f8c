//! Client-side session state
//!
//! Holds the conversation identity, the step cursor and the last
//! registration-data snapshot received from the orchestrator.

use serde_json::{Map, Value};
use thiserror::Error;

/// Step token used for the first submission after a conversation starts.
pub const START_STEP: &str = "start";

/// The only step token with terminal meaning on the client.
pub const COMPLETED_STEP: &str = "completed";

/// Registration data as received, keyed by field name in receipt order.
pub type RegistrationData = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("conversation already started")]
    AlreadyStarted,
}

/// Mutable state for the single dialogue a client instance drives.
///
/// Fields are private; the step driver mutates them through `begin`,
/// `advance_step` and `record_snapshot` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    conversation_id: Option<String>,
    current_step: String,
    registration_snapshot: Option<RegistrationData>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            conversation_id: None,
            current_step: START_STEP.to_string(),
            registration_snapshot: None,
        }
    }

    /// Bind the session to a conversation issued by the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStarted`] if an identity is already set.
    pub fn begin(&mut self, conversation_id: impl Into<String>) -> Result<(), SessionError> {
        if self.conversation_id.is_some() {
            return Err(SessionError::AlreadyStarted);
        }
        self.conversation_id = Some(conversation_id.into());
        Ok(())
    }

    pub fn advance_step(&mut self, token: impl Into<String>) {
        self.current_step = token.into();
    }

    pub fn record_snapshot(&mut self, data: RegistrationData) {
        self.registration_snapshot = Some(data);
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn current_step(&self) -> &str {
        &self.current_step
    }

    pub fn registration_snapshot(&self) -> Option<&RegistrationData> {
        self.registration_snapshot.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.conversation_id.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.current_step == COMPLETED_STEP
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
