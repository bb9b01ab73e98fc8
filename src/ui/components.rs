use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::confirm::{ConfirmChoice, Confirmation, PendingAction};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, NoticeKind};

/// Fixed colour palette.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub danger: Color,
}

impl Theme {
    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
            danger: Color::Rgb(0xf3, 0x8b, 0xa8),       // red
        }
    }
}

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let state = if app.list.loading {
        format!("  requests:{}", app.list.in_flight())
    } else {
        String::new()
    };
    let msg = format!(
        "mode: {mode}  users:{}  shown:{}  rows/page:{}{state}",
        app.list.len(),
        app.visible_users().len(),
        app.rows_per_page,
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the outcome/validation notice on top of everything else.
pub fn render_notice_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(notice) = app.notice() else {
        return;
    };
    let accent = match notice.kind {
        NoticeKind::Success => app.theme.success,
        NoticeKind::Error => app.theme.danger,
        NoticeKind::Validation => app.theme.highlight_fg,
    };
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 44u16.min(max_w);
    let approx_lines = (notice.message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 4).min(area.height.saturating_sub(2).max(5));
    let rect = centered_rect(width, height, area);

    let queued = app.pending_notices().saturating_sub(1);
    let hint = if queued > 0 {
        format!("Enter/Esc: next ({queued} more)")
    } else {
        "Enter/Esc: OK".to_string()
    };
    let body = vec![
        Line::raw(notice.message.clone()),
        Line::styled(hint, Style::default().fg(app.theme.muted)),
    ];
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(
                notice.title.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Two-button Cancel/Confirm dialog.
pub fn render_confirm_modal(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    confirmation: &Confirmation,
) {
    let rect = centered_rect(50, 8, area);
    let button = |choice: ConfirmChoice, label: &str| {
        let style = if confirmation.selected == choice {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(app.theme.text)
        };
        Span::styled(format!("[ {label} ]"), style)
    };
    let subject = match &confirmation.action {
        PendingAction::Delete { id, name } => format!("{name} (id {id})"),
        PendingAction::Update { id, user } => format!("{} (id {id})", user.name),
    };
    let lines = vec![
        Line::raw(confirmation.question()),
        Line::styled(subject, Style::default().fg(app.theme.muted)),
        Line::raw(""),
        Line::from(vec![
            button(ConfirmChoice::Cancel, "Cancel"),
            Span::raw("   "),
            button(ConfirmChoice::Confirm, confirmation.confirm_label()),
        ]),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(confirmation.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.danger)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal listing the configured keys.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(40);
    let height = 20u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let entry = |label: &str, action: KeyAction| {
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(
                app.keymap.keys_for(action).join(" / "),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ])
    };
    let fixed = |label: &str, keys: &str| {
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(keys.to_string(), Style::default().add_modifier(Modifier::ITALIC)),
        ])
    };
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("List"),
        entry("Add user", KeyAction::NewUser),
        entry("Edit selected", KeyAction::EditSelection),
        entry("Delete selected", KeyAction::DeleteSelection),
        entry("Refresh", KeyAction::Refresh),
        entry("Search", KeyAction::StartSearch),
        entry("Move up", KeyAction::MoveUp),
        entry("Move down", KeyAction::MoveDown),
        entry("Previous page", KeyAction::PageUp),
        entry("Next page", KeyAction::PageDown),
        entry("Quit", KeyAction::Quit),
        Line::raw(""),
        heading("Form"),
        fixed("Next / previous field", "Tab, Down / Shift+Tab, Up"),
        fixed("Save or cancel", "Enter on the button, Esc closes"),
        Line::raw(""),
        heading("Confirm dialog"),
        fixed("Choose", "Left / Right, y confirms, n or Esc cancels"),
        Line::raw(""),
        fixed("Close help", "Esc / Enter"),
    ];

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
