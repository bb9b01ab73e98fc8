pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(root[1]);

    render_header(f, root[0], app);
    users::render_users_table(f, body[0], app);
    users::render_user_details(f, body[1], app);
    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
    if app.notice().is_some() {
        components::render_notice_modal(f, f.area(), app);
    }
}

/// Title, loading indicator and the add/refresh actions.
fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(
        "User Management",
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
    )];
    if app.list.loading {
        let frame = SPINNER[app.spinner_frame % SPINNER.len()];
        spans.push(Span::styled(
            format!("  {frame} loading"),
            Style::default().fg(app.theme.highlight_fg),
        ));
    }
    match app.input_mode {
        InputMode::Search => spans.push(Span::raw(format!("  Search: {}_", app.search_query))),
        _ if !app.search_query.is_empty() => {
            spans.push(Span::raw(format!("  filter: \"{}\"", app.search_query)))
        }
        _ => {}
    }
    spans.push(Span::raw(
        "  n: add user  r: refresh  e: edit  d: delete  /: search  ?: help  q: quit",
    ));

    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(app.endpoint.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::Form(form)) => users::render_form_modal(f, area, app, form),
        Some(ModalState::Confirm(confirmation)) => {
            components::render_confirm_modal(f, area, app, confirmation)
        }
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        None => {}
    }
}
