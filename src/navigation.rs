//! Route table for the three pages
//!
//! Session data travels as an explicit route parameter rather than ambient
//! navigation state, so a route value always carries what its page needs.

/// Session data handed from role selection to the interview page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Handoff {
    pub session_id: Option<String>,
    pub question: Option<String>,
}

impl Handoff {
    pub fn new(session_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            question: Some(question.into()),
        }
    }

    /// Both fields present and non-empty, or nothing
    pub fn validate(&self) -> Option<(&str, &str)> {
        let session_id = self.session_id.as_deref().filter(|s| !s.is_empty())?;
        let question = self.question.as_deref().filter(|q| !q.is_empty())?;
        Some((session_id, question))
    }
}

/// Application routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Login form, also where every interview ends
    Welcome,
    SelectRole,
    Interview(Handoff),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Welcome => "/",
            Route::SelectRole => "/select-role",
            Route::Interview(_) => "/interview",
        }
    }
}
