//! Interview session runtime executor

use super::traits::AnswerClient;
use super::RuntimeEvent;

use crate::state_machine::{
    transition, Effect, Event, SessionContext, SessionState, TransitionError,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

/// Generic session runtime that can work with any answer client
pub struct InterviewRuntime<C>
where
    C: AnswerClient + 'static,
{
    context: SessionContext,
    state: SessionState,
    client: Arc<C>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<RuntimeEvent>,
    /// Stops the runtime when the page goes away
    shutdown: CancellationToken,
    /// Token to cancel the outstanding submission
    submit_cancel_token: Option<CancellationToken>,
    /// Set once a navigation effect has been emitted
    finished: bool,
}

impl<C> InterviewRuntime<C>
where
    C: AnswerClient + 'static,
{
    pub fn new(
        context: SessionContext,
        state: SessionState,
        client: C,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        broadcast_tx: broadcast::Sender<RuntimeEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            context,
            state,
            client: Arc::new(client),
            event_rx,
            event_tx,
            broadcast_tx,
            shutdown,
            submit_cancel_token: None,
            finished: false,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting interview runtime");

        // Process events in a loop - no recursion
        while !self.finished {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                Some(event) = self.event_rx.recv() => {
                    self.process_event(event);
                }
                else => break,
            }
        }

        // A late response must never land on a page that is gone
        if let Some(token) = self.submit_cancel_token.take() {
            token.cancel();
        }

        tracing::info!(session_id = %self.context.session_id, "Interview runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(TransitionError::StaleResponse(submission_id)) => {
                tracing::debug!(%submission_id, "Discarding response for abandoned submission");
                return;
            }
            // The page can race its own snapshot; a disabled submit stays silent
            Err(TransitionError::SubmissionInFlight) => {
                tracing::debug!("Ignoring submit while an answer is in flight");
                return;
            }
            Err(e) => {
                // Transition errors are user-facing (e.g., "already submitting")
                tracing::warn!(error = %e, "Rejected session event");
                let _ = self.broadcast_tx.send(RuntimeEvent::Rejected {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    /// Execute an effect
    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PublishState => {
                let _ = self.broadcast_tx.send(RuntimeEvent::StateChange {
                    state: self.state.clone(),
                });
            }

            Effect::SubmitAnswer {
                submission_id,
                session_id,
                text,
            } => {
                let cancel_token = CancellationToken::new();
                self.submit_cancel_token = Some(cancel_token.clone());

                // Spawn the request as a background task
                let client = self.client.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    tracing::info!(%session_id, %submission_id, "Submitting answer (background)");

                    // Race the request against abandonment
                    tokio::select! {
                        biased;

                        () = cancel_token.cancelled() => {
                            tracing::info!(%submission_id, "Answer submission cancelled");
                        }

                        result = client.submit_answer(&session_id, &text) => {
                            let event = match result {
                                Ok(response) => Event::AnswerAccepted {
                                    submission_id,
                                    feedback: response.feedback,
                                    question: response.question,
                                },
                                Err(error) => Event::AnswerFailed {
                                    submission_id,
                                    error,
                                },
                            };
                            let _ = event_tx.send(event).await;
                        }
                    }
                });
            }

            Effect::AbortSubmission => {
                if let Some(token) = self.submit_cancel_token.take() {
                    token.cancel();
                }
            }

            Effect::ReportFailure { error } => {
                tracing::error!(
                    session_id = %self.context.session_id,
                    kind = %error.kind,
                    retryable = error.is_retryable(),
                    error = %error.message,
                    "Error submitting answer"
                );
                let _ = self
                    .broadcast_tx
                    .send(RuntimeEvent::SubmissionFailed { error });
            }

            Effect::Navigate { route } => {
                tracing::info!(
                    session_id = %self.context.session_id,
                    turns = self.state.history.len(),
                    path = route.path(),
                    "Leaving interview"
                );
                self.finished = true;
                let _ = self.broadcast_tx.send(RuntimeEvent::Navigate { route });
            }
        }
    }
}
