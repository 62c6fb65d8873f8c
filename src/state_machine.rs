//! Step-interpretation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! the session plus an event yield the next session and a list of effects.

mod effect;
pub mod event;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use transition::{transition, StepPolicy, TransitionError, TransitionResult};
