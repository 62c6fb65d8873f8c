//! Client configuration from the environment

use crate::state_machine::StepPolicy;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration for the registration client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Orchestrator base URL
    pub api_url: String,
    /// Per-request timeout; `None` waits forever
    pub timeout: Option<Duration>,
    /// Advance on a bare `next_step` with no accompanying message
    pub advance_without_message: bool,
    /// Refuse new input while a submission is outstanding
    pub serialize_submissions: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            advance_without_message: false,
            serialize_submissions: false,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("REGISTRATION_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            timeout: lookup("REGISTRATION_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            advance_without_message: lookup("REGISTRATION_ADVANCE_WITHOUT_MESSAGE")
                .map_or(defaults.advance_without_message, |v| parse_flag(&v)),
            serialize_submissions: lookup("REGISTRATION_SERIALIZE_SUBMISSIONS")
                .map_or(defaults.serialize_submissions, |v| parse_flag(&v)),
        }
    }

    pub fn step_policy(&self) -> StepPolicy {
        StepPolicy {
            advance_without_message: self.advance_without_message,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
