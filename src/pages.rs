//! Terminal pages, one per route

mod interview;
mod select_role;
mod welcome;

pub use interview::InterviewPage;
pub use select_role::{
    start_session, Mode, RoleAction, SelectRolePage, SessionStart, Status, ROLES,
};
pub use welcome::{Field, WelcomePage};
