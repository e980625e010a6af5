//! Effects produced by state transitions

use crate::api::ApiError;
use crate::navigation::Route;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Publish the new state to the page
    PublishState,

    /// Send an answer to the backend (spawns as background task)
    SubmitAnswer {
        submission_id: String,
        session_id: String,
        text: String,
    },

    /// Abandon the outstanding submission
    AbortSubmission,

    /// Log a failed submission and surface it to the page
    ReportFailure { error: ApiError },

    /// Leave the interview page
    Navigate { route: Route },
}

impl Effect {
    pub fn submit_answer(
        submission_id: impl Into<String>,
        session_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Effect::SubmitAnswer {
            submission_id: submission_id.into(),
            session_id: session_id.into(),
            text: text.into(),
        }
    }

    pub fn navigate(route: Route) -> Self {
        Effect::Navigate { route }
    }
}
