//! AI Mock Interviewer - terminal client
//!
//! Walks a candidate through login, role selection and a question/answer
//! interview against the interview backend.

mod api;
mod app;
mod config;
mod navigation;
mod pages;
mod runtime;
mod state_machine;
mod ui;

use api::{HttpInterviewApi, LoggingApi};
use app::App;
use config::ClientConfig;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;

    // The terminal belongs to the UI, so logs go to a file
    let log_file = config.open_log_file()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_interviewer=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.request_timeout.map(|t| t.as_secs()),
        log_path = %config.log_path.display(),
        "Configuration loaded"
    );

    let http = HttpInterviewApi::new(&config.api_url, config.request_timeout)?;
    let api = Arc::new(LoggingApi::new(Arc::new(http)));

    let mut terminal = ratatui::init();
    let result = App::new(api).run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(error = %e, "Terminal error");
    }
    result?;
    Ok(())
}
