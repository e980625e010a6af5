//! Terminal rendering for each page

use crate::api::Seniority;
use crate::app::Page;
use crate::pages::{Field, InterviewPage, Mode, SelectRolePage, Status, WelcomePage, ROLES};
use crate::state_machine::Phase;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(frame: &mut Frame, page: &Page) {
    match page {
        Page::Welcome(page) => render_welcome(frame, page),
        Page::SelectRole(page) => render_select_role(frame, page),
        Page::Interview(page) => render_interview(frame, page),
    }
}

fn render_welcome(frame: &mut Frame, page: &WelcomePage) {
    let area = centered(frame.area(), 60, 12);
    let [title, email, password, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new("Welcome to the AI Mock Interviewer").bold().centered(),
        title,
    );
    frame.render_widget(
        Paragraph::new(page.email.as_str()).block(input_block("Email", page.focus == Field::Email)),
        email,
    );
    frame.render_widget(
        Paragraph::new(page.masked_password())
            .block(input_block("Password", page.focus == Field::Password)),
        password,
    );
    frame.render_widget(
        Paragraph::new("Tab switch field  Enter log in  Ctrl+C quit").dark_gray(),
        help,
    );
}

fn render_select_role(frame: &mut Frame, page: &SelectRolePage) {
    let area = centered(frame.area(), 70, 20);
    let [title, body, seniority, status, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new("Choose your interview").bold().centered(),
        title,
    );

    match page.mode {
        Mode::Pick => {
            let items: Vec<ListItem> = ROLES.iter().map(|role| ListItem::new(*role)).collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Role"))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(page.role_index));
            frame.render_stateful_widget(list, body, &mut state);

            let mut spans = vec![Span::raw("Seniority: ")];
            for level in Seniority::ALL {
                let label = Span::raw(format!(" {} ", level.as_str()));
                spans.push(if level == page.seniority {
                    label.reversed()
                } else {
                    label.dark_gray()
                });
            }
            let line = Line::from(spans);
            frame.render_widget(Paragraph::new(line), seniority);
        }
        Mode::Describe => {
            frame.render_widget(
                Paragraph::new(page.description.as_str())
                    .wrap(Wrap { trim: false })
                    .block(input_block("Describe the interview you want", true)),
                body,
            );
        }
    }

    let status_line = match &page.status {
        Status::Idle => Line::default(),
        Status::Starting => Line::from("Starting interview...").yellow(),
        Status::Failed(message) => Line::from(format!("Could not start: {message}")).red(),
    };
    frame.render_widget(Paragraph::new(status_line).wrap(Wrap { trim: true }), status);

    let hint = match page.mode {
        Mode::Pick => "Up/Down role  Left/Right seniority  Tab describe  Enter start  Esc back",
        Mode::Describe => "Tab pick from list  Enter start  Esc back",
    };
    frame.render_widget(Paragraph::new(hint).dark_gray(), help);
}

fn render_interview(frame: &mut Frame, page: &InterviewPage) {
    let state = &page.state;
    let [title, chat, banner, input, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(u16::from(page.banner.is_some())),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new("AI Mock Interview").bold().centered(), title);

    let mut lines: Vec<Line> = Vec::new();
    for turn in &state.history {
        lines.push(labelled("Question", &turn.question, Color::Cyan));
        lines.push(labelled("You", &turn.answer, Color::Green));
        lines.push(labelled("Feedback", &turn.feedback, Color::Magenta));
        lines.push(Line::default());
    }
    match state.phase {
        Phase::Answering => lines.push(labelled("Question", &state.current_question, Color::Cyan)),
        Phase::Deciding => {
            lines.push(Line::from("Would you like to continue to the next question?").bold());
        }
    }

    // Scroll by wrapped rows so the newest line (the question) stays visible
    let conversation = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    let rows = conversation.line_count(chat.width.saturating_sub(2));
    let height = chat.height.saturating_sub(2);
    let overflow = u16::try_from(rows).unwrap_or(u16::MAX).saturating_sub(height);
    frame.render_widget(
        conversation
            .scroll((overflow, 0))
            .block(Block::default().borders(Borders::ALL)),
        chat,
    );

    if let Some(message) = &page.banner {
        frame.render_widget(Paragraph::new(message.as_str()).red(), banner);
    }

    match state.phase {
        Phase::Answering => {
            let title = if state.is_in_flight() {
                "Submitting..."
            } else {
                "Your answer"
            };
            frame.render_widget(
                Paragraph::new(state.draft.as_str())
                    .wrap(Wrap { trim: false })
                    .block(input_block(title, !state.is_in_flight())),
                input,
            );
            frame.render_widget(
                Paragraph::new("Enter submit  Ctrl+J newline  Ctrl+U clear  Esc end interview")
                    .dark_gray(),
                help,
            );
        }
        Phase::Deciding => {
            frame.render_widget(
                Paragraph::new("[y] Yes, next question    [n] No, end interview")
                    .block(Block::default().borders(Borders::ALL)),
                input,
            );
        }
    }
}

fn labelled<'a>(label: &'a str, text: &'a str, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(color).bold()),
        Span::raw(text),
    ])
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, cell, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(row);
    cell
}
