//! HTTP implementation of the interview backend API

use super::types::{
    AnswerRequest, AnswerResponse, ErrorBody, SessionRequest, SessionStarted, StartRequest,
};
use super::{ApiError, InterviewApi};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Talks JSON over HTTP to a fixed backend origin
pub struct HttpInterviewApi {
    client: Client,
    base_url: String,
}

impl HttpInterviewApi {
    /// `timeout` of `None` leaves requests pending until the transport resolves them
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_status(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::decode(format!("Failed to parse response: {e} - body: {text}")))
    }
}

fn classify_transport(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        ApiError::network(format!("Connection failed: {e}"))
    } else {
        ApiError::network(format!("Request failed: {e}"))
    }
}

fn classify_status(status: StatusCode, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| body.to_string(), |parsed| parsed.message());
    let message = match status.as_u16() {
        404 => format!("Not found: {detail}"),
        422 => format!("Rejected: {detail}"),
        500..=599 => format!("Server error: {detail}"),
        _ => format!("HTTP {status}: {detail}"),
    };
    ApiError::server(status.as_u16(), message)
}

#[async_trait]
impl InterviewApi for HttpInterviewApi {
    async fn start_interview(&self, request: &StartRequest) -> Result<SessionStarted, ApiError> {
        self.post_json("/interview/start", request).await
    }

    async fn create_session(&self, request: &SessionRequest) -> Result<SessionStarted, ApiError> {
        self.post_json("/session", request).await
    }

    async fn submit_answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ApiError> {
        self.post_json("/interview/answer", request).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
