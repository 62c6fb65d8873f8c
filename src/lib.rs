//! Registration chat client
//!
//! Walks a user through a multi-step registration dialogue served by a
//! remote orchestrator, rendering each exchange as a chat transcript.

pub mod app;
pub mod config;
pub mod driver;
pub mod input;
pub mod orchestrator;
pub mod session;
pub mod state_machine;
pub mod transcript;

pub use config::ClientConfig;
pub use driver::StepDriver;
pub use input::InputGate;
pub use orchestrator::{HttpOrchestrator, LoggingOrchestrator, OrchestratorClient};
pub use session::Session;
pub use transcript::{TerminalTranscript, Transcript, TranscriptSink, Turn};
