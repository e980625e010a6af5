//! Interview session state types

use serde::{Deserialize, Serialize};

/// Which half of the turn cycle the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Question visible, draft editable, submit enabled
    #[default]
    Answering,
    /// Turn finished, waiting for the user to continue or end
    Deciding,
}

/// A completed question/answer/feedback exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub feedback: String,
}

/// An answer that has been sent and is awaiting the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Correlates the eventual response with this request
    pub id: String,
    /// Exactly the text that went over the wire
    pub text: String,
}

/// Edits applied to the pending answer draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Insert(char),
    Backspace,
    Replace(String),
}

impl DraftEdit {
    pub fn apply(&self, draft: &mut String) {
        match self {
            DraftEdit::Insert(c) => draft.push(*c),
            DraftEdit::Backspace => {
                draft.pop();
            }
            DraftEdit::Replace(text) => text.clone_into(draft),
        }
    }
}

/// Client-side interview session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub current_question: String,
    /// Append-only for the lifetime of the session
    pub history: Vec<Turn>,
    pub draft: String,
    pub phase: Phase,
    pub in_flight: Option<Submission>,
}

impl SessionState {
    pub fn new(initial_question: impl Into<String>) -> Self {
        Self {
            current_question: initial_question.into(),
            history: Vec::new(),
            draft: String::new(),
            phase: Phase::Answering,
            in_flight: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Answering && !self.is_in_flight()
    }
}

/// Immutable session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Opaque backend token, sent unchanged with every answer
    pub session_id: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}
