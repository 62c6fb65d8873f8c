//! Effects produced by state transitions

use crate::orchestrator::StepRequest;
use crate::transcript::Turn;

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn(Turn),

    /// Send user input to the orchestrator
    SubmitStep(StepRequest),

    /// Permanently disable the input gate
    CloseInput,
}

impl Effect {
    pub fn say(text: impl Into<String>) -> Self {
        Effect::AppendTurn(Turn::system(text))
    }

    pub fn echo(text: impl Into<String>) -> Self {
        Effect::AppendTurn(Turn::user(text))
    }

    /// Turn carried by this effect, if any
    pub fn turn(&self) -> Option<&Turn> {
        match self {
            Effect::AppendTurn(turn) => Some(turn),
            _ => None,
        }
    }
}
