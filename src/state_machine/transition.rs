//! Pure state transition function
//!
//! Covers the two-phase turn cycle: answer submission, response handling,
//! continue/end decisions, and leaving the session.

use super::state::{Phase, SessionContext, SessionState, Submission, Turn};
use super::{Effect, Event};
use crate::navigation::Route;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("An answer is already being submitted")]
    SubmissionInFlight,
    #[error("Answer input is disabled until you continue or end the interview")]
    InputDisabled,
    #[error("Response for submission {0} no longer applies")]
    StaleResponse(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; all I/O is
/// described by the returned effects.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        // ============================================================
        // Draft editing
        // ============================================================
        (Phase::Answering, Event::DraftEdited { edit }) => {
            let mut next = state.clone();
            edit.apply(&mut next.draft);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (Phase::Deciding, Event::DraftEdited { .. } | Event::SubmitRequested { .. }) => {
            Err(TransitionError::InputDisabled)
        }

        // ============================================================
        // Answer submission
        // ============================================================
        (Phase::Answering, Event::SubmitRequested { .. }) if state.is_in_flight() => {
            Err(TransitionError::SubmissionInFlight)
        }

        // Whitespace-only drafts are ignored entirely
        (Phase::Answering, Event::SubmitRequested { .. }) if state.draft.trim().is_empty() => {
            Ok(TransitionResult::new(state.clone()))
        }

        (Phase::Answering, Event::SubmitRequested { submission_id }) => {
            // The untrimmed draft is what gets sent and recorded
            let text = state.draft.clone();
            let mut next = state.clone();
            next.in_flight = Some(Submission {
                id: submission_id.clone(),
                text: text.clone(),
            });
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishState)
                .with_effect(Effect::submit_answer(
                    submission_id,
                    &context.session_id,
                    text,
                )))
        }

        // ============================================================
        // Backend responses
        // ============================================================
        (
            _,
            Event::AnswerAccepted {
                submission_id,
                feedback,
                question,
            },
        ) => {
            let submission = matching_submission(state, &submission_id)?;
            let mut next = state.clone();
            next.history.push(Turn {
                question: state.current_question.clone(),
                answer: submission.text.clone(),
                feedback,
            });
            next.current_question = question;
            next.draft.clear();
            next.phase = Phase::Deciding;
            next.in_flight = None;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (_, Event::AnswerFailed {
            submission_id,
            error,
        }) => {
            matching_submission(state, &submission_id)?;
            // Draft, question, history and phase stay put so the user can retry
            let mut next = state.clone();
            next.in_flight = None;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::ReportFailure { error })
                .with_effect(Effect::PublishState))
        }

        // ============================================================
        // Continue / end
        // ============================================================
        (Phase::Deciding, Event::ContinueRequested) => {
            let mut next = state.clone();
            next.phase = Phase::Answering;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishState))
        }

        (Phase::Answering, Event::ContinueRequested) => Err(TransitionError::InvalidTransition(
            "continue is only offered after an answer has been reviewed".to_string(),
        )),

        // Ending is honored in any phase, even mid-request
        (_, Event::EndRequested) => {
            let abort = state.is_in_flight().then_some(Effect::AbortSubmission);
            let mut next = state.clone();
            next.in_flight = None;
            Ok(TransitionResult::new(next)
                .with_effects(abort)
                .with_effect(Effect::navigate(Route::Welcome)))
        }
    }
}

fn matching_submission<'a>(
    state: &'a SessionState,
    submission_id: &str,
) -> Result<&'a Submission, TransitionError> {
    state
        .in_flight
        .as_ref()
        .filter(|s| s.id == submission_id)
        .ok_or_else(|| TransitionError::StaleResponse(submission_id.to_string()))
}
