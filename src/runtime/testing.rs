//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::*;
use crate::api::{
    AnswerRequest, AnswerResponse, ApiError, InterviewApi, SessionRequest, SessionStarted,
    StartRequest,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Answer Client
// ============================================================================

/// Mock answer client that returns queued responses
pub struct MockAnswerClient {
    responses: Mutex<VecDeque<Result<AnswerResponse, ApiError>>>,
    /// Record of all (`session_id`, text) pairs submitted
    pub requests: Mutex<Vec<(String, String)>>,
}

impl MockAnswerClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, feedback: &str, question: &str) {
        self.responses.lock().unwrap().push_back(Ok(AnswerResponse {
            feedback: feedback.to_string(),
            question: question.to_string(),
        }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<AnswerResponse, ApiError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::network("No mock response queued")))
    }
}

impl Default for MockAnswerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerClient for MockAnswerClient {
    async fn submit_answer(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<AnswerResponse, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((session_id.to_string(), text.to_string()));
        self.next_response()
    }
}

// ============================================================================
// Delayed Mock Answer Client (for in-flight and cancellation testing)
// ============================================================================

/// Mock answer client with configurable delay
pub struct DelayedMockAnswerClient {
    inner: MockAnswerClient,
    delay: Duration,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
    /// Set only if a request ran to completion
    pub completed: AtomicBool,
}

impl DelayedMockAnswerClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockAnswerClient::new(),
            delay,
            request_started: Arc::new(Notify::new()),
            completed: AtomicBool::new(false),
        }
    }

    pub fn queue_response(&self, feedback: &str, question: &str) {
        self.inner.queue_response(feedback, question);
    }

    pub fn recorded_requests(&self) -> Vec<(String, String)> {
        self.inner.recorded_requests()
    }
}

#[async_trait]
impl AnswerClient for DelayedMockAnswerClient {
    async fn submit_answer(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<AnswerResponse, ApiError> {
        self.inner
            .requests
            .lock()
            .unwrap()
            .push((session_id.to_string(), text.to_string()));
        // notify_one keeps a permit if the test is not waiting yet
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.completed.store(true, Ordering::SeqCst);
        self.inner.next_response()
    }
}

// ============================================================================
// Mock Interview API (for page testing)
// ============================================================================

/// Mock backend covering the session-creating endpoints
pub struct MockInterviewApi {
    sessions: Mutex<VecDeque<Result<SessionStarted, ApiError>>>,
    /// Record of `/interview/start` bodies
    pub starts: Mutex<Vec<StartRequest>>,
    /// Record of `/session` bodies
    pub session_requests: Mutex<Vec<SessionRequest>>,
    answers: MockAnswerClient,
}

impl MockInterviewApi {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(VecDeque::new()),
            starts: Mutex::new(Vec::new()),
            session_requests: Mutex::new(Vec::new()),
            answers: MockAnswerClient::new(),
        }
    }

    /// Queue the outcome of the next session-creating call
    pub fn queue_session(&self, result: Result<SessionStarted, ApiError>) {
        self.sessions.lock().unwrap().push_back(result);
    }

    pub fn queue_answer(&self, feedback: &str, question: &str) {
        self.answers.queue_response(feedback, question);
    }

    fn next_session(&self) -> Result<SessionStarted, ApiError> {
        self.sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::network("No mock session queued")))
    }
}

impl Default for MockInterviewApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InterviewApi for MockInterviewApi {
    async fn start_interview(&self, request: &StartRequest) -> Result<SessionStarted, ApiError> {
        self.starts.lock().unwrap().push(request.clone());
        self.next_session()
    }

    async fn create_session(&self, request: &SessionRequest) -> Result<SessionStarted, ApiError> {
        self.session_requests.lock().unwrap().push(request.clone());
        self.next_session()
    }

    async fn submit_answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ApiError> {
        self.answers
            .submit_answer(&request.session_id, &request.text)
            .await
    }

    fn base_url(&self) -> &str {
        "http://mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::navigation::Route;
    use crate::runtime::{InterviewHandle, RuntimeEvent};
    use crate::state_machine::{
        DraftEdit, Event, Phase, SessionContext, SessionState, Turn,
    };
    use tokio::sync::broadcast;

    fn start_session<C: AnswerClient + 'static>(
        client: C,
    ) -> (InterviewHandle, broadcast::Receiver<RuntimeEvent>) {
        let handle = InterviewHandle::spawn(
            SessionContext::new("abc123"),
            SessionState::new("Tell me about yourself."),
            client,
        );
        let rx = handle.subscribe();
        (handle, rx)
    }

    async fn next_event(rx: &mut broadcast::Receiver<RuntimeEvent>) -> RuntimeEvent {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("runtime event should arrive")
            .expect("runtime channel open")
    }

    async fn next_state(rx: &mut broadcast::Receiver<RuntimeEvent>) -> SessionState {
        loop {
            if let RuntimeEvent::StateChange { state } = next_event(rx).await {
                return state;
            }
        }
    }

    async fn type_answer(handle: &InterviewHandle, rx: &mut broadcast::Receiver<RuntimeEvent>, text: &str) {
        handle
            .send(Event::edit(DraftEdit::Replace(text.to_string())))
            .await;
        let state = next_state(rx).await;
        assert_eq!(state.draft, text);
    }

    #[tokio::test]
    async fn test_successful_turn() {
        let client = Arc::new(MockAnswerClient::new());
        client.queue_response("Good start.", "Why this role?");
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "I am an engineer.").await;
        handle.send(Event::submit()).await;

        let pending = next_state(&mut rx).await;
        assert!(pending.is_in_flight());
        assert_eq!(pending.phase, Phase::Answering);

        let done = next_state(&mut rx).await;
        assert_eq!(
            done.history,
            vec![Turn {
                question: "Tell me about yourself.".to_string(),
                answer: "I am an engineer.".to_string(),
                feedback: "Good start.".to_string(),
            }]
        );
        assert_eq!(done.current_question, "Why this role?");
        assert_eq!(done.phase, Phase::Deciding);
        assert_eq!(done.draft, "");
        assert!(!done.is_in_flight());

        assert_eq!(
            client.recorded_requests(),
            vec![("abc123".to_string(), "I am an engineer.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_whitespace_submit_sends_nothing() {
        let client = Arc::new(MockAnswerClient::new());
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "   ").await;
        handle.send(Event::submit()).await;

        // Events are processed in order, so this edit proves the submit was handled
        type_answer(&handle, &mut rx, "   x").await;

        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_network_error_keeps_session() {
        let client = Arc::new(MockAnswerClient::new());
        client.queue_error(ApiError::network("Connection failed: refused"));
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "I am an engineer.").await;
        handle.send(Event::submit()).await;

        let pending = next_state(&mut rx).await;
        assert!(pending.is_in_flight());

        match next_event(&mut rx).await {
            RuntimeEvent::SubmissionFailed { error } => {
                assert_eq!(error.kind, ApiErrorKind::Network);
            }
            other => panic!("expected SubmissionFailed, got {other:?}"),
        }

        let after = next_state(&mut rx).await;
        assert!(after.history.is_empty());
        assert_eq!(after.current_question, "Tell me about yourself.");
        assert_eq!(after.draft, "I am an engineer.");
        assert_eq!(after.phase, Phase::Answering);
        assert!(!after.is_in_flight());
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let client = Arc::new(MockAnswerClient::new());
        client.queue_error(ApiError::server(503, "Server error: unavailable"));
        client.queue_response("Better.", "Next?");
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "answer").await;
        handle.send(Event::submit()).await;
        loop {
            if let RuntimeEvent::SubmissionFailed { .. } = next_event(&mut rx).await {
                break;
            }
        }
        let _ = next_state(&mut rx).await;

        handle.send(Event::submit()).await;
        let _pending = next_state(&mut rx).await;
        let done = next_state(&mut rx).await;
        assert_eq!(done.history.len(), 1);
        assert_eq!(done.history[0].feedback, "Better.");
        assert_eq!(client.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_second_submit_ignored_while_in_flight() {
        let client = Arc::new(DelayedMockAnswerClient::new(Duration::from_millis(300)));
        client.queue_response("Good start.", "Why this role?");
        let started = client.request_started.clone();
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "I am an engineer.").await;
        handle.send(Event::submit()).await;
        assert!(next_state(&mut rx).await.is_in_flight());

        tokio::time::timeout(Duration::from_secs(1), started.notified())
            .await
            .expect("request should start");

        handle.send(Event::submit()).await;

        // The refused submit produces nothing; the next event is the completed turn
        match next_event(&mut rx).await {
            RuntimeEvent::StateChange { state } => assert_eq!(state.phase, Phase::Deciding),
            other => panic!("expected StateChange, got {other:?}"),
        }
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_continue_after_turn() {
        let client = Arc::new(MockAnswerClient::new());
        client.queue_response("Good start.", "Why this role?");
        let (handle, mut rx) = start_session(client);

        type_answer(&handle, &mut rx, "I am an engineer.").await;
        handle.send(Event::submit()).await;
        let _pending = next_state(&mut rx).await;
        let deciding = next_state(&mut rx).await;

        handle.send(Event::ContinueRequested).await;
        let answering = next_state(&mut rx).await;
        assert_eq!(answering.phase, Phase::Answering);
        assert_eq!(answering.history, deciding.history);
        assert_eq!(answering.current_question, "Why this role?");
    }

    /// Ending mid-request must navigate immediately and discard the response
    #[tokio::test]
    async fn test_end_during_request() {
        let client = Arc::new(DelayedMockAnswerClient::new(Duration::from_secs(5)));
        client.queue_response("Discarded.", "Discarded?");
        let started = client.request_started.clone();
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "I am an engineer.").await;
        handle.send(Event::submit()).await;
        tokio::time::timeout(Duration::from_secs(1), started.notified())
            .await
            .expect("request should start");

        let start = tokio::time::Instant::now();
        handle.send(Event::EndRequested).await;

        let route = loop {
            if let RuntimeEvent::Navigate { route } = next_event(&mut rx).await {
                break route;
            }
        };
        assert_eq!(route, Route::Welcome);
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "End should not wait for the request"
        );
        assert!(!client.completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropping_handle_abandons_request() {
        let client = Arc::new(DelayedMockAnswerClient::new(Duration::from_millis(200)));
        client.queue_response("Discarded.", "Discarded?");
        let started = client.request_started.clone();
        let (handle, mut rx) = start_session(client.clone());

        type_answer(&handle, &mut rx, "answer").await;
        handle.send(Event::submit()).await;
        tokio::time::timeout(Duration::from_secs(1), started.notified())
            .await
            .expect("request should start");

        drop(handle);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(!client.completed.load(Ordering::SeqCst));
        assert_eq!(client.recorded_requests().len(), 1);
    }
}
