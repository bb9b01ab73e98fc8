use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::AppState;
use crate::app::form::{FormField, UserForm};
use crate::ui::components::centered_rect;

/// Paged table of the visible users; the page follows the selection.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let visible = app.visible_users();
    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let start = start.min(visible.len());
    let end = (start + app.rows_per_page).min(visible.len());

    let rows = visible[start..end].iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
        ])
        .style(style)
    });

    let widths = [Constraint::Length(8), Constraint::Percentage(40), Constraint::Percentage(60)];
    let header = Row::new(vec!["ID", "NAME", "EMAIL"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if visible.is_empty() && !app.list.loading {
        "Users (empty)".to_string()
    } else {
        format!("Users ({})", visible.len())
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected_user() {
        Some(u) => format!(
            "Name: {}\nEmail: {}\nID: {}\nPassword: {}",
            u.name,
            u.email,
            u.id.map(|id| id.to_string()).unwrap_or_else(|| "(unsaved)".to_string()),
            "*".repeat(u.password.chars().count()),
        ),
        None => "No user selected".to_string(),
    };
    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Add/edit form: three inputs and Save/Cancel buttons.
pub fn render_form_modal(f: &mut Frame, area: Rect, app: &AppState, form: &UserForm) {
    let rect = centered_rect(56, 10, area);
    let marker = |field: FormField| if form.focus == field { "▶" } else { " " };
    let focused = Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD);
    let plain = Style::default().fg(app.theme.text);
    let style_for = |field: FormField| if form.focus == field { focused } else { plain };

    let password_mask = "*".repeat(form.password.chars().count());
    let inputs = [
        (FormField::Name, form.name.as_str()),
        (FormField::Email, form.email.as_str()),
        (FormField::Password, password_mask.as_str()),
    ];
    let mut lines: Vec<Line> = inputs
        .iter()
        .map(|(field, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{} {:<9}", marker(*field), format!("{}:", field.label())),
                    style_for(*field),
                ),
                Span::raw(value.to_string()),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} [ Save ]", marker(FormField::Save)),
            style_for(FormField::Save),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} [ Cancel ]", marker(FormField::Cancel)),
            style_for(FormField::Cancel),
        ),
    ]));
    if form.submitting {
        lines.push(Line::styled("Saving...", Style::default().fg(app.theme.muted)));
    }

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
