//! Step driver
//!
//! Owns the session, feeds orchestrator outcomes through the pure
//! transition function and executes the resulting effects against the
//! transcript and input gate.

use crate::input::InputGate;
use crate::orchestrator::{OrchestratorClient, OrchestratorError, StepRequest, StepResponse};
use crate::session::Session;
use crate::state_machine::transition::NOT_STARTED_TEXT;
use crate::state_machine::{transition, Effect, Event, StepPolicy, TransitionError};
use crate::transcript::{Turn, TranscriptSink};
use std::sync::Arc;

pub struct StepDriver<C, T>
where
    C: OrchestratorClient + 'static,
    T: TranscriptSink,
{
    session: Session,
    policy: StepPolicy,
    client: Arc<C>,
    transcript: T,
    gate: InputGate,
}

impl<C, T> StepDriver<C, T>
where
    C: OrchestratorClient + 'static,
    T: TranscriptSink,
{
    pub fn new(client: C, transcript: T) -> Self {
        Self {
            session: Session::new(),
            policy: StepPolicy::default(),
            client: Arc::new(client),
            transcript,
            gate: InputGate::new(),
        }
    }

    pub fn with_policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_gate(mut self, gate: InputGate) -> Self {
        self.gate = gate;
        self
    }

    /// Begin the conversation. Failure leaves the driver unusable.
    pub async fn start(&mut self) {
        if self.session.is_started() {
            tracing::error!(
                conversation_id = ?self.session.conversation_id(),
                "Conversation already started"
            );
            return;
        }

        let event = match self.client.start().await {
            Ok(conversation_id) => Event::Started { conversation_id },
            Err(e) => Event::StartFailed { message: e.message },
        };
        self.dispatch(event);
    }

    /// Accept one line of user input.
    ///
    /// Echoes the input and returns the request to send, or `None` when the
    /// gate or the state machine rejected it.
    pub fn prepare_submission(&mut self, text: &str) -> Option<StepRequest> {
        let text = self.gate.submit(text)?;
        let request = self.dispatch(Event::UserInput { text });
        if request.is_some() {
            self.gate.submission_started();
        }
        request
    }

    /// Apply the outcome of a submission issued by `prepare_submission`.
    ///
    /// Outcomes are interpreted against the session as it is now, not as it
    /// was when the request was issued.
    pub fn apply_outcome(&mut self, outcome: Result<StepResponse, OrchestratorError>) {
        self.gate.submission_finished();
        let event = match outcome {
            Ok(response) => Event::StepResponded(response),
            Err(e) => Event::SubmitFailed { message: e.message },
        };
        self.dispatch(event);
    }

    /// Submit user input and wait for the orchestrator's answer
    pub async fn submit(&mut self, text: &str) {
        let Some(request) = self.prepare_submission(text) else {
            return;
        };
        let outcome = self.client.submit_step(&request).await;
        self.apply_outcome(outcome);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transcript(&self) -> &T {
        &self.transcript
    }

    pub fn client(&self) -> Arc<C> {
        Arc::clone(&self.client)
    }

    pub fn is_input_open(&self) -> bool {
        self.gate.is_open()
    }

    /// Run one transition and execute its effects.
    ///
    /// Returns the step request if the transition asked for one.
    fn dispatch(&mut self, event: Event) -> Option<StepRequest> {
        let result = match transition(&self.session, &self.policy, event) {
            Ok(result) => result,
            Err(e) => {
                self.handle_rejection(&e);
                return None;
            }
        };

        self.session = result.session;

        let mut request = None;
        for effect in result.effects {
            match effect {
                Effect::AppendTurn(turn) => self.transcript.append(turn),
                Effect::SubmitStep(req) => {
                    tracing::debug!(
                        conversation_id = %req.conversation_id,
                        step = %req.current_step,
                        "Submitting step"
                    );
                    request = Some(req);
                }
                Effect::CloseInput => {
                    tracing::info!(
                        conversation_id = ?self.session.conversation_id(),
                        "Registration dialogue completed"
                    );
                    self.gate.close();
                }
            }
        }
        request
    }

    fn handle_rejection(&mut self, error: &TransitionError) {
        match error {
            TransitionError::EmptyInput | TransitionError::DialogueCompleted => {
                tracing::debug!(error = %error, "Input ignored");
            }
            TransitionError::NotStarted => {
                tracing::warn!("Input received before a conversation was started");
                self.transcript.append(Turn::system(NOT_STARTED_TEXT));
            }
            TransitionError::Session(e) => {
                tracing::error!(error = %e, "Session rejected transition");
            }
        }
    }
}
