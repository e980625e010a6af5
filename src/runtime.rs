//! Runtime for executing interview sessions
//!
//! One runtime task per mounted interview page. The page talks to it through
//! an `InterviewHandle`; dropping the handle stops the runtime and abandons
//! any outstanding submission.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::InterviewRuntime;
pub use traits::*;

use crate::api::ApiError;
use crate::navigation::Route;
use crate::state_machine::{Event, SessionContext, SessionState};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

/// Events sent from the runtime to the page
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    StateChange { state: SessionState },
    /// An answer could not be delivered; the session itself is unchanged
    SubmissionFailed { error: ApiError },
    /// An event was refused by the state machine
    Rejected { message: String },
    Navigate { route: Route },
}

/// Handle to interact with a running session
pub struct InterviewHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<RuntimeEvent>,
    shutdown: CancellationToken,
}

impl InterviewHandle {
    /// Start a runtime for a freshly mounted session
    pub fn spawn<C>(context: SessionContext, state: SessionState, client: C) -> Self
    where
        C: AnswerClient + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let shutdown = CancellationToken::new();

        let runtime = InterviewRuntime::new(
            context,
            state,
            client,
            event_rx,
            event_tx.clone(),
            broadcast_tx.clone(),
            shutdown.clone(),
        );
        tokio::spawn(runtime.run());

        Self {
            event_tx,
            broadcast_tx,
            shutdown,
        }
    }

    pub async fn send(&self, event: Event) {
        if self.event_tx.send(event).await.is_err() {
            tracing::debug!("Interview runtime already stopped, dropping event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.broadcast_tx.subscribe()
    }
}

impl Drop for InterviewHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
