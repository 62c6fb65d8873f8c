//! Pure state transition function
//!
//! Given the same session, policy and event this always produces the same
//! result, with no I/O side effects.

use super::{Effect, Event};
use crate::orchestrator::{StepOption, StepRequest, StepResponse};
use crate::session::{RegistrationData, Session, SessionError};
use std::fmt::Write;
use thiserror::Error;

pub const WELCOME_TEXT: &str = "Welcome! Send any message to begin your registration.";
pub const START_APOLOGY_TEXT: &str =
    "Sorry, I couldn't reach the registration service. Please restart to try again.";
pub const SUBMIT_APOLOGY_TEXT: &str = "Sorry, something went wrong. Please try again.";
pub const NOT_STARTED_TEXT: &str =
    "The conversation is not connected. Please restart to try again.";
pub const SUMMARY_HEADER: &str = "Please review your details:";
pub const CONFIRMATION_TEXT: &str = "Is this information correct? (yes/no)";
pub const COMPLETION_TEXT: &str = "Thank you! Your registration is complete.";

const OPTIONS_PREFIX: &str = "Options: ";
const OPTIONS_SEPARATOR: &str = ", ";

/// Tunable parts of the response-interpretation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepPolicy {
    /// Advance on `next_step` even when no `next_step_message` accompanies it
    pub advance_without_message: bool,
}

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Turns this transition appends, in order
    pub fn turns(&self) -> impl Iterator<Item = &crate::transcript::Turn> {
        self.effects.iter().filter_map(Effect::turn)
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("No conversation has been started")]
    NotStarted,
    #[error("Input is empty")]
    EmptyInput,
    #[error("Dialogue already completed")]
    DialogueCompleted,
}

/// Pure transition function
pub fn transition(
    session: &Session,
    policy: &StepPolicy,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Startup
        // ============================================================
        Event::Started { conversation_id } => {
            let mut next = session.clone();
            next.begin(conversation_id)?;
            Ok(TransitionResult::new(next).with_effect(Effect::say(WELCOME_TEXT)))
        }

        Event::StartFailed { .. } => {
            Ok(TransitionResult::new(session.clone()).with_effect(Effect::say(START_APOLOGY_TEXT)))
        }

        // ============================================================
        // User input
        // ============================================================
        Event::UserInput { text } => {
            if session.is_completed() {
                return Err(TransitionError::DialogueCompleted);
            }
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            let Some(conversation_id) = session.conversation_id() else {
                return Err(TransitionError::NotStarted);
            };

            let request = StepRequest {
                conversation_id: conversation_id.to_string(),
                current_step: session.current_step().to_string(),
                user_input: text.to_string(),
            };
            Ok(TransitionResult::new(session.clone())
                .with_effect(Effect::echo(text))
                .with_effect(Effect::SubmitStep(request)))
        }

        // ============================================================
        // Orchestrator responses
        // ============================================================
        Event::StepResponded(response) => Ok(interpret_response(session, policy, response)),

        Event::SubmitFailed { .. } => Ok(
            TransitionResult::new(session.clone()).with_effect(Effect::say(SUBMIT_APOLOGY_TEXT))
        ),
    }
}

/// Apply a step response as an ordered series of independent checks.
///
/// `error` short-circuits everything else. Otherwise the step message,
/// options, data summary and completion checks each fire when applicable,
/// always in that order.
fn interpret_response(
    session: &Session,
    policy: &StepPolicy,
    response: StepResponse,
) -> TransitionResult {
    let mut next = session.clone();

    if let Some(error) = response.error {
        return TransitionResult::new(next).with_effect(Effect::say(error));
    }

    let mut effects = Vec::new();

    match (response.next_step_message, response.next_step) {
        (Some(message), step) => {
            effects.push(Effect::say(message));
            // A message with no step token leaves the cursor where it is.
            if let Some(step) = step {
                next.advance_step(step);
            }
        }
        (None, Some(step)) if policy.advance_without_message => next.advance_step(step),
        (None, _) => {}
    }

    if let Some(options) = response.options {
        effects.push(Effect::say(render_options(&options)));
    }

    if let Some(data) = response.registration_data {
        let summary = render_summary(&data);
        next.record_snapshot(data);
        effects.push(Effect::say(summary));
        effects.push(Effect::say(CONFIRMATION_TEXT));
    }

    if next.is_completed() {
        effects.push(Effect::say(COMPLETION_TEXT));
        effects.push(Effect::CloseInput);
    }

    TransitionResult::new(next).with_effects(effects)
}

/// Options in the order supplied, joined onto one line
pub fn render_options(options: &[StepOption]) -> String {
    let labels: Vec<&str> = options.iter().map(StepOption::label).collect();
    format!("{OPTIONS_PREFIX}{}", labels.join(OPTIONS_SEPARATOR))
}

/// One `key: <json>` line per field, in the map's own order
pub fn render_summary(data: &RegistrationData) -> String {
    let mut summary = SUMMARY_HEADER.to_string();
    for (key, value) in data {
        // Value's Display is compact JSON.
        let _ = write!(summary, "\n{key}: {value}");
    }
    summary
}
