//! Interview backend API
//!
//! Provides a common interface for the remote service that creates sessions
//! and scores answers.

mod client;
mod error;
mod types;

pub use client::HttpInterviewApi;
pub use error::{ApiError, ApiErrorKind};
pub use types::{
    AnswerRequest, AnswerResponse, Seniority, SessionRequest, SessionStarted, StartRequest,
};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for the interview backend
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Create a session for an explicit role and seniority
    async fn start_interview(&self, request: &StartRequest) -> Result<SessionStarted, ApiError>;

    /// Create a session from a free-text description of the interview wanted
    async fn create_session(&self, request: &SessionRequest) -> Result<SessionStarted, ApiError>;

    /// Send one answer and receive feedback plus the next question
    async fn submit_answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ApiError>;

    /// Backend origin, for diagnostics
    fn base_url(&self) -> &str;
}

/// Logging wrapper for API implementations
pub struct LoggingApi {
    inner: Arc<dyn InterviewApi>,
}

impl LoggingApi {
    pub fn new(inner: Arc<dyn InterviewApi>) -> Self {
        Self { inner }
    }

    fn log_outcome<T>(
        &self,
        endpoint: &str,
        started: std::time::Instant,
        result: &Result<T, ApiError>,
    ) {
        let duration = started.elapsed();
        match result {
            Ok(_) => {
                tracing::info!(
                    backend = %self.inner.base_url(),
                    endpoint,
                    duration_ms = %duration.as_millis(),
                    "API request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    backend = %self.inner.base_url(),
                    endpoint,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    retryable = e.is_retryable(),
                    "API request failed"
                );
            }
        }
    }
}

#[async_trait]
impl InterviewApi for LoggingApi {
    async fn start_interview(&self, request: &StartRequest) -> Result<SessionStarted, ApiError> {
        let started = std::time::Instant::now();
        let result = self.inner.start_interview(request).await;
        self.log_outcome("/interview/start", started, &result);
        result
    }

    async fn create_session(&self, request: &SessionRequest) -> Result<SessionStarted, ApiError> {
        let started = std::time::Instant::now();
        let result = self.inner.create_session(request).await;
        self.log_outcome("/session", started, &result);
        result
    }

    async fn submit_answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ApiError> {
        let started = std::time::Instant::now();
        let result = self.inner.submit_answer(request).await;
        self.log_outcome("/interview/answer", started, &result);
        result
    }

    fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}
