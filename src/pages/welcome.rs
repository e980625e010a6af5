//! Login form
//!
//! Credentials are collected but never checked; submitting always moves on
//! to role selection.

use crate::navigation::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct WelcomePage {
    pub email: String,
    pub password: String,
    pub focus: Field,
}

impl WelcomePage {
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Route> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Email => Field::Password,
                    Field::Password => Field::Email,
                };
                None
            }
            KeyCode::Enter => {
                tracing::info!("Login submitted");
                Some(Route::SelectRole)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_mut().push(c);
                None
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                None
            }
            _ => None,
        }
    }

    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }
}
