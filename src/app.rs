//! Navigation shell
//!
//! Owns the current page and routes terminal input, session-start results and
//! interview runtime events to it. Leaving the interview page drops its
//! runtime handle, which abandons any answer still in flight.

use crate::api::{ApiError, InterviewApi, SessionStarted};
use crate::navigation::Route;
use crate::pages::{
    start_session, InterviewPage, RoleAction, SelectRolePage, SessionStart, WelcomePage,
};
use crate::runtime::{ApiAnswerClient, RuntimeEvent};
use crate::ui;
use crossterm::event::{
    Event as TerminalEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::sync::Arc;
use tokio::sync::mpsc;

pub enum Page {
    Welcome(WelcomePage),
    SelectRole(SelectRolePage),
    Interview(InterviewPage),
}

/// Results of background work started by a page
#[derive(Debug)]
pub enum AppMessage {
    SessionStarted(Result<SessionStarted, ApiError>),
}

/// Everything the main loop can wake up for
#[derive(Debug)]
pub enum AppInput {
    Key(KeyEvent),
    Message(AppMessage),
    /// `None` when the interview runtime went away
    Runtime(Option<RuntimeEvent>),
    Redraw,
    Quit,
}

pub struct App {
    api: Arc<dyn InterviewApi>,
    pub page: Page,
    msg_tx: mpsc::Sender<AppMessage>,
    msg_rx: mpsc::Receiver<AppMessage>,
    quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn InterviewApi>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(8);
        Self {
            api,
            page: Page::Welcome(WelcomePage::default()),
            msg_tx,
            msg_rx,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        tracing::info!(api = self.api.base_url(), "Client started");
        let mut terminal_events = EventStream::new();

        while !self.should_quit() {
            terminal.draw(|frame| ui::render(frame, &self.page))?;
            let input = self.next_input(&mut terminal_events).await;
            self.handle_input(input).await;
        }

        tracing::info!("Client exiting");
        Ok(())
    }

    async fn next_input(&mut self, terminal_events: &mut EventStream) -> AppInput {
        let Self { page, msg_rx, .. } = self;

        let runtime = async {
            match page {
                Page::Interview(page) => page.next_event().await,
                _ => std::future::pending().await,
            }
        };

        tokio::select! {
            event = terminal_events.next() => match event {
                Some(Ok(TerminalEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    AppInput::Key(key)
                }
                Some(Ok(_)) => AppInput::Redraw,
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Terminal input failed");
                    AppInput::Quit
                }
                None => AppInput::Quit,
            },
            Some(message) = msg_rx.recv() => AppInput::Message(message),
            event = runtime => AppInput::Runtime(event),
        }
    }

    pub async fn handle_input(&mut self, input: AppInput) {
        match input {
            AppInput::Key(key) => {
                if is_quit(key) {
                    self.quit = true;
                } else {
                    self.handle_key(key).await;
                }
            }
            AppInput::Message(AppMessage::SessionStarted(result)) => {
                if let Page::SelectRole(page) = &mut self.page {
                    if let Some(route) = page.session_started(result) {
                        self.navigate(route);
                    }
                } else {
                    tracing::debug!("Session start finished after leaving role selection");
                }
            }
            AppInput::Runtime(Some(event)) => {
                if let Page::Interview(page) = &mut self.page {
                    if let Some(route) = page.apply(event) {
                        self.navigate(route);
                    }
                }
            }
            AppInput::Runtime(None) => {
                tracing::warn!("Interview runtime stopped unexpectedly");
                self.navigate(Route::Welcome);
            }
            AppInput::Redraw => {}
            AppInput::Quit => self.quit = true,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let mut start = None;
        let route = match &mut self.page {
            Page::Welcome(page) => page.handle_key(key),
            Page::SelectRole(page) => match page.handle_key(key) {
                Some(RoleAction::Back) => Some(Route::Welcome),
                Some(RoleAction::Start(request)) => {
                    start = Some(request);
                    None
                }
                None => None,
            },
            Page::Interview(page) => {
                page.handle_key(key).await;
                None
            }
        };

        if let Some(start) = start {
            self.spawn_start(start);
        }
        if let Some(route) = route {
            self.navigate(route);
        }
    }

    fn spawn_start(&self, start: SessionStart) {
        let api = Arc::clone(&self.api);
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = start_session(api.as_ref(), &start).await;
            if tx.send(AppMessage::SessionStarted(result)).await.is_err() {
                tracing::debug!("App gone before session start finished");
            }
        });
    }

    /// Replace the current page. The interview route goes through the
    /// page's entry guard and may redirect.
    pub fn navigate(&mut self, route: Route) {
        let mut route = route;
        loop {
            tracing::info!(path = route.path(), "Navigating");
            match route {
                Route::Welcome => {
                    self.page = Page::Welcome(WelcomePage::default());
                    return;
                }
                Route::SelectRole => {
                    self.page = Page::SelectRole(SelectRolePage::default());
                    return;
                }
                Route::Interview(handoff) => {
                    let client = ApiAnswerClient::new(Arc::clone(&self.api));
                    match InterviewPage::mount(&handoff, client) {
                        Ok(page) => {
                            self.page = Page::Interview(page);
                            return;
                        }
                        Err(redirect) => route = redirect,
                    }
                }
            }
        }
    }
}

fn is_quit(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
