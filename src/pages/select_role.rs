//! Role selection
//!
//! Picks a role and seniority (or takes a free-text description) and asks the
//! backend to open a session. A successful start hands the session over to
//! the interview route.

use crate::api::{
    ApiError, InterviewApi, Seniority, SessionRequest, SessionStarted, StartRequest,
};
use crate::navigation::{Handoff, Route};
use crossterm::event::{KeyCode, KeyEvent};

pub const ROLES: &[&str] = &[
    "Data Scientist",
    "Software Engineer",
    "Machine Learning Engineer",
    "Data Analyst",
    "Product Manager",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Choose from the role list
    #[default]
    Pick,
    /// Describe the interview in your own words
    Describe,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Starting,
    Failed(String),
}

/// How the session should be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStart {
    Pick(StartRequest),
    Describe(SessionRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAction {
    Back,
    Start(SessionStart),
}

#[derive(Debug, Default)]
pub struct SelectRolePage {
    pub role_index: usize,
    pub seniority: Seniority,
    pub mode: Mode,
    pub description: String,
    pub status: Status,
}

impl SelectRolePage {
    pub fn selected_role(&self) -> &'static str {
        ROLES[self.role_index % ROLES.len()]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<RoleAction> {
        match (self.mode, key.code) {
            (_, KeyCode::Esc) => Some(RoleAction::Back),
            (_, KeyCode::Tab | KeyCode::BackTab) => {
                self.mode = match self.mode {
                    Mode::Pick => Mode::Describe,
                    Mode::Describe => Mode::Pick,
                };
                None
            }
            (_, KeyCode::Enter) => self.start(),

            (Mode::Pick, KeyCode::Up) => {
                self.role_index = (self.role_index + ROLES.len() - 1) % ROLES.len();
                None
            }
            (Mode::Pick, KeyCode::Down) => {
                self.role_index = (self.role_index + 1) % ROLES.len();
                None
            }
            (Mode::Pick, KeyCode::Left) => {
                self.seniority = self.seniority.prev();
                None
            }
            (Mode::Pick, KeyCode::Right) => {
                self.seniority = self.seniority.next();
                None
            }

            (Mode::Describe, KeyCode::Char(c)) => {
                self.description.push(c);
                None
            }
            (Mode::Describe, KeyCode::Backspace) => {
                self.description.pop();
                None
            }
            _ => None,
        }
    }

    fn start(&mut self) -> Option<RoleAction> {
        if self.status == Status::Starting {
            return None;
        }
        let start = match self.mode {
            Mode::Pick => {
                SessionStart::Pick(StartRequest::new(self.selected_role(), self.seniority))
            }
            Mode::Describe if self.description.trim().is_empty() => return None,
            Mode::Describe => SessionStart::Describe(SessionRequest {
                user_text: self.description.clone(),
                session_id: None,
            }),
        };
        self.status = Status::Starting;
        Some(RoleAction::Start(start))
    }

    /// Outcome of a start request; a session moves on to the interview
    pub fn session_started(&mut self, result: Result<SessionStarted, ApiError>) -> Option<Route> {
        match result {
            Ok(started) => {
                self.status = Status::Idle;
                Some(Route::Interview(Handoff::new(
                    started.session_id,
                    started.question,
                )))
            }
            Err(e) => {
                self.status = Status::Failed(e.message);
                None
            }
        }
    }
}

/// Ask the backend for a new session
pub async fn start_session(
    api: &dyn InterviewApi,
    start: &SessionStart,
) -> Result<SessionStarted, ApiError> {
    match start {
        SessionStart::Pick(request) => {
            tracing::info!(
                role = %request.role,
                seniority = request.seniority.as_str(),
                "Starting interview"
            );
            api.start_interview(request).await
        }
        SessionStart::Describe(request) => {
            tracing::info!("Starting interview from description");
            api.create_session(request).await
        }
    }
}
