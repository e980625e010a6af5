//! Interview page
//!
//! Mounting validates the handoff from role selection and starts a session
//! runtime. The page keeps the latest state snapshot for rendering and turns
//! key presses into session events.

use crate::navigation::{Handoff, Route};
use crate::runtime::{AnswerClient, InterviewHandle, RuntimeEvent};
use crate::state_machine::{DraftEdit, Event, Phase, SessionContext, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::broadcast;

pub struct InterviewPage {
    handle: InterviewHandle,
    events: broadcast::Receiver<RuntimeEvent>,
    pub state: SessionState,
    /// Last failure or refusal, cleared on the next submit
    pub banner: Option<String>,
}

impl InterviewPage {
    /// Entry guard: without a session id and opening question there is
    /// nothing to interview on, so the caller is sent home instead.
    pub fn mount<C>(handoff: &Handoff, client: C) -> Result<Self, Route>
    where
        C: AnswerClient + 'static,
    {
        let Some((session_id, question)) = handoff.validate() else {
            tracing::warn!(
                has_session = handoff.session_id.is_some(),
                has_question = handoff.question.is_some(),
                "Interview opened without a session, redirecting"
            );
            return Err(Route::Welcome);
        };

        tracing::info!(session_id, "Interview mounted");
        let handle = InterviewHandle::spawn(
            SessionContext::new(session_id),
            SessionState::new(question),
            client,
        );
        let events = handle.subscribe();

        Ok(Self {
            handle,
            events,
            state: SessionState::new(question),
            banner: None,
        })
    }

    /// Translate a key press into a session event, if it means anything in
    /// the current phase
    pub fn key_event(&mut self, key: KeyEvent) -> Option<Event> {
        if key.code == KeyCode::Esc {
            return Some(Event::EndRequested);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match self.state.phase {
            Phase::Answering => match key.code {
                KeyCode::Enter if self.state.can_submit() => {
                    self.banner = None;
                    Some(Event::submit())
                }
                KeyCode::Char('j') if ctrl => Some(Event::edit(DraftEdit::Insert('\n'))),
                KeyCode::Char('u') if ctrl => Some(Event::edit(DraftEdit::Replace(String::new()))),
                KeyCode::Char(c) if !ctrl => Some(Event::edit(DraftEdit::Insert(c))),
                KeyCode::Backspace => Some(Event::edit(DraftEdit::Backspace)),
                _ => None,
            },
            Phase::Deciding => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Event::ContinueRequested),
                KeyCode::Char('n' | 'N') => Some(Event::EndRequested),
                _ => None,
            },
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if let Some(event) = self.key_event(key) {
            self.handle.send(event).await;
        }
    }

    /// Wait for the next runtime event. `None` once the runtime is gone.
    pub async fn next_event(&mut self) -> Option<RuntimeEvent> {
        loop {
            match self.events.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Snapshots are whole states, so the next one catches us up
                    tracing::warn!(skipped, "Interview page lagged behind runtime");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Fold a runtime event into the page; returns a route to leave for
    pub fn apply(&mut self, event: RuntimeEvent) -> Option<Route> {
        match event {
            RuntimeEvent::StateChange { state } => {
                self.state = state;
                None
            }
            RuntimeEvent::SubmissionFailed { error } => {
                let hint = if error.is_retryable() {
                    " Press Enter to try again."
                } else {
                    ""
                };
                self.banner = Some(format!(
                    "Could not submit your answer: {}.{hint}",
                    error.message
                ));
                None
            }
            RuntimeEvent::Rejected { message } => {
                self.banner = Some(message);
                None
            }
            RuntimeEvent::Navigate { route } => Some(route),
        }
    }
}
