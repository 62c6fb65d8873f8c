//! Terminal event loop
//!
//! Interleaves user lines with in-flight submissions on one task. The input
//! gate is not closed while a submission is outstanding (unless configured
//! to be), so responses are applied in whatever order they arrive.

use crate::driver::StepDriver;
use crate::orchestrator::{OrchestratorClient, OrchestratorError, StepResponse};
use crate::transcript::TranscriptSink;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Drive a dialogue from start to completion or end of input.
///
/// Returns once the dialogue has completed, or input has ended and every
/// outstanding submission has been applied. A failed start returns
/// immediately.
pub async fn run<C, T>(driver: &mut StepDriver<C, T>, mut lines: mpsc::Receiver<String>)
where
    C: OrchestratorClient + 'static,
    T: TranscriptSink,
{
    driver.start().await;
    if !driver.session().is_started() {
        return;
    }

    let client = driver.client();
    let mut in_flight: FuturesUnordered<BoxFuture<'static, Result<StepResponse, OrchestratorError>>> =
        FuturesUnordered::new();
    let mut reading = true;

    loop {
        if !driver.is_input_open() {
            reading = false;
        }
        if !reading && in_flight.is_empty() {
            break;
        }

        tokio::select! {
            biased;

            Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                driver.apply_outcome(outcome);
            }

            line = lines.recv(), if reading => match line {
                Some(line) => {
                    if let Some(request) = driver.prepare_submission(&line) {
                        let client = Arc::clone(&client);
                        in_flight.push(Box::pin(async move { client.submit_step(&request).await }));
                    }
                }
                None => {
                    tracing::debug!(outstanding = in_flight.len(), "Input closed");
                    reading = false;
                }
            },
        }
    }
}

/// Forward stdin lines from a dedicated thread.
///
/// A blocking stdin read cannot be cancelled, so it lives outside the
/// runtime and the process can exit while it is parked.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}
