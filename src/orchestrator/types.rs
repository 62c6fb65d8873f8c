//! Wire types for the orchestrator's `/start` and `/process` endpoints

use crate::session::RegistrationData;
use serde::{Deserialize, Serialize};

/// Body returned by `POST /start`
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    pub conversation_id: String,
}

/// Body sent to `POST /process`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRequest {
    pub conversation_id: String,
    pub current_step: String,
    pub user_input: String,
}

/// A selectable option offered by the orchestrator.
///
/// Older services send bare strings; the registration service sends
/// `{value, label}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepOption {
    Text(String),
    Choice { value: String, label: String },
}

impl StepOption {
    /// Text shown to the user
    pub fn label(&self) -> &str {
        match self {
            StepOption::Text(text) => text,
            StepOption::Choice { label, .. } => label,
        }
    }
}

impl From<&str> for StepOption {
    fn from(text: &str) -> Self {
        StepOption::Text(text.to_string())
    }
}

/// Body returned by `POST /process`.
///
/// Every field is optional and independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<StepOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_data: Option<RegistrationData>,

    // Informational fields; logged, never rendered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl StepResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn next(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            next_step: Some(step.into()),
            next_step_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<StepOption>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_registration_data(mut self, data: RegistrationData) -> Self {
        self.registration_data = Some(data);
        self
    }
}

/// Error body produced by the orchestrator on non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
