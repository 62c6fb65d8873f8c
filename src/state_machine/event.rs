//! Events that can occur in a registration dialogue

use crate::orchestrator::StepResponse;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Startup
    Started { conversation_id: String },
    StartFailed { message: String },

    // User events
    UserInput { text: String },

    // Orchestrator events
    StepResponded(StepResponse),
    SubmitFailed { message: String },
}
