//! Registration chat - terminal client for the registration orchestrator

use registration_chat::{
    app, ClientConfig, HttpOrchestrator, InputGate, LoggingOrchestrator, StepDriver,
    TerminalTranscript,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; stdout belongs to the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registration_chat=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = ClientConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        timeout = ?config.timeout,
        advance_without_message = config.advance_without_message,
        serialize_submissions = config.serialize_submissions,
        "Starting registration chat"
    );

    let client = LoggingOrchestrator::new(HttpOrchestrator::new(&config.api_url, config.timeout)?);
    let gate = if config.serialize_submissions {
        InputGate::serialized()
    } else {
        InputGate::new()
    };

    let mut driver = StepDriver::new(client, TerminalTranscript::new(std::io::stdout()))
        .with_policy(config.step_policy())
        .with_gate(gate);

    app::run(&mut driver, app::spawn_stdin_reader()).await;

    tracing::info!(
        conversation_id = ?driver.session().conversation_id(),
        step = %driver.session().current_step(),
        "Registration chat finished"
    );
    Ok(())
}
