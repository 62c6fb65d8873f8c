//! Input gate in front of the step driver

/// Filters user submissions before they reach the driver.
///
/// Closing is permanent: once the dialogue completes nothing reopens it.
#[derive(Debug, Default)]
pub struct InputGate {
    closed: bool,
    serialize: bool,
    in_flight: usize,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate that also refuses input while a submission is outstanding
    pub fn serialized() -> Self {
        Self {
            serialize: true,
            ..Self::default()
        }
    }

    /// Returns the trimmed text if it may be forwarded, `None` otherwise.
    pub fn submit(&self, text: &str) -> Option<String> {
        if self.closed {
            tracing::debug!("Input gate closed, ignoring submission");
            return None;
        }
        if self.serialize && self.in_flight > 0 {
            tracing::debug!(in_flight = self.in_flight, "Submission outstanding, ignoring input");
            return None;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_string())
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub(crate) fn submission_started(&mut self) {
        self.in_flight += 1;
    }

    pub(crate) fn submission_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
