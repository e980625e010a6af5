//! Wire types for the interview backend

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /interview/answer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    /// Sent exactly as typed, surrounding whitespace included
    pub text: String,
}

/// Response of `POST /interview/answer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub feedback: String,
    /// The next question to ask
    pub question: String,
}

/// Body of `POST /interview/start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub role: String,
    pub seniority: Seniority,
}

impl StartRequest {
    pub fn new(role: impl Into<String>, seniority: Seniority) -> Self {
        Self {
            session_id: None,
            role: role.into(),
            seniority,
        }
    }
}

/// Body of `POST /session`: the backend extracts role and seniority itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub user_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Response of both session-creating endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub session_id: String,
    /// First question of the interview
    pub question: String,
}

/// Error body produced by the backend framework
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    /// Human-readable detail, whether the backend sent a string or a list
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

/// Candidate seniority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    #[default]
    Mid,
    Senior,
}

impl Seniority {
    pub const ALL: [Seniority; 3] = [Seniority::Junior, Seniority::Mid, Seniority::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Seniority::Junior => Seniority::Mid,
            Seniority::Mid | Seniority::Senior => Seniority::Senior,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Seniority::Senior => Seniority::Mid,
            Seniority::Mid | Seniority::Junior => Seniority::Junior,
        }
    }
}
