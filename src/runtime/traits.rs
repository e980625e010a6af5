//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::api::{AnswerRequest, AnswerResponse, ApiError, InterviewApi};
use async_trait::async_trait;
use std::sync::Arc;

/// Client for submitting answers
#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Send one answer for a session
    async fn submit_answer(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<AnswerResponse, ApiError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: AnswerClient + ?Sized> AnswerClient for Arc<T> {
    async fn submit_answer(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<AnswerResponse, ApiError> {
        (**self).submit_answer(session_id, text).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use an `InterviewApi` as `AnswerClient`
pub struct ApiAnswerClient {
    api: Arc<dyn InterviewApi>,
}

impl ApiAnswerClient {
    pub fn new(api: Arc<dyn InterviewApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AnswerClient for ApiAnswerClient {
    async fn submit_answer(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<AnswerResponse, ApiError> {
        let request = AnswerRequest {
            session_id: session_id.to_string(),
            text: text.to_string(),
        };
        self.api.submit_answer(&request).await
    }
}
