//! Core interview session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{DraftEdit, Phase, SessionContext, SessionState, Turn};
pub use transition::{transition, TransitionError};
