//! Events that can occur during an interview session

use super::state::DraftEdit;
use crate::api::ApiError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    DraftEdited {
        edit: DraftEdit,
    },
    SubmitRequested {
        /// Generated by the caller so the transition stays pure
        submission_id: String,
    },
    ContinueRequested,
    EndRequested,

    // Backend events
    AnswerAccepted {
        submission_id: String,
        feedback: String,
        question: String,
    },
    AnswerFailed {
        submission_id: String,
        error: ApiError,
    },
}

impl Event {
    pub fn submit() -> Self {
        Event::SubmitRequested {
            submission_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn edit(edit: DraftEdit) -> Self {
        Event::DraftEdited { edit }
    }
}
