use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::app::confirm::ConfirmChoice;
use crate::app::form::FormField;
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::search::{apply_search, clear_search};
use crate::ui;

/// Drive the screen until the user quits. The collection is loaded on entry.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
) -> Result<()> {
    app.refresh();

    loop {
        app.drain_outcomes();
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(&mut app, key).is_break()
        {
            break;
        }

        app.tick();
    }

    info!(uptime_secs = app.started_at.elapsed().as_secs(), "exiting");
    Ok(())
}

/// Route one key press. Returns `Break` when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> ControlFlow<()> {
    if app.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_notice();
        }
        return ControlFlow::Continue(());
    }

    match app.input_mode {
        InputMode::Normal => return handle_normal_key(app, key),
        InputMode::Modal => handle_modal_key(app, key.code),
        InputMode::Search => match key.code {
            KeyCode::Enter => apply_search(app),
            KeyCode::Esc => clear_search(app),
            KeyCode::Backspace => {
                app.search_query.pop();
                app.selected_index = 0;
            }
            KeyCode::Char(c) => {
                app.search_query.push(c);
                app.selected_index = 0;
            }
            _ => {}
        },
    }
    ControlFlow::Continue(())
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> ControlFlow<()> {
    let Some(action) = app.keymap.resolve(&key) else {
        return ControlFlow::Continue(());
    };
    let visible = app.visible_users().len();
    let rpp = app.rows_per_page.max(1);
    match action {
        KeyAction::Quit => return ControlFlow::Break(()),
        KeyAction::NewUser => app.open_add(),
        KeyAction::EditSelection => app.open_edit(),
        KeyAction::DeleteSelection => app.request_delete(),
        KeyAction::Refresh => app.refresh(),
        KeyAction::StartSearch => {
            app.search_query.clear();
            app.input_mode = InputMode::Search;
        }
        KeyAction::OpenHelp => app.open_help(),
        KeyAction::MoveUp => app.selected_index = app.selected_index.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_index + 1 < visible {
                app.selected_index += 1;
            }
        }
        KeyAction::PageUp => app.selected_index = app.selected_index.saturating_sub(rpp),
        KeyAction::PageDown => {
            app.selected_index = app
                .selected_index
                .saturating_add(rpp)
                .min(visible.saturating_sub(1));
        }
        KeyAction::Ignore => {}
    }
    ControlFlow::Continue(())
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Form(form)) => match code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Enter => match form.focus {
                FormField::Save => app.submit_form(),
                FormField::Cancel => app.close_modal(),
                _ => form.focus_next(),
            },
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        },
        Some(ModalState::Confirm(confirmation)) => match code {
            KeyCode::Esc | KeyCode::Char('n') => app.resolve_confirmation(ConfirmChoice::Cancel),
            KeyCode::Char('y') => app.resolve_confirmation(ConfirmChoice::Confirm),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => confirmation.toggle(),
            KeyCode::Enter => {
                let choice = confirmation.selected;
                app.resolve_confirmation(choice);
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        None => app.input_mode = InputMode::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CollectionClient, User};
    use crate::app::keymap::Keymap;
    use crate::error::ApiError;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    struct Offline;

    impl CollectionClient for Offline {
        fn list(&self) -> Result<Vec<User>, ApiError> {
            Ok(Vec::new())
        }
        fn create(&self, user: &User) -> Result<User, ApiError> {
            Ok(user.clone().with_id(1))
        }
        fn update(&self, _id: u64, user: &User) -> Result<User, ApiError> {
            Ok(user.clone())
        }
        fn remove(&self, _id: u64) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn app_with(users: Vec<User>) -> AppState {
        let mut app = AppState::new(Arc::new(Offline), Keymap::default(), "test");
        app.list.replace_all(users);
        app
    }

    fn press(app: &mut AppState, code: KeyCode) -> ControlFlow<()> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut app = app_with(vec![]);
        let _ = press(&mut app, KeyCode::Char('n'));
        assert!(press(&mut app, KeyCode::Char('q')).is_continue());
        if let Some(ModalState::Form(form)) = &app.modal {
            assert_eq!(form.name, "q");
        } else {
            panic!("form should be open");
        }
        let _ = press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(press(&mut app, KeyCode::Char('q')).is_break());
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let users = (1..=3).map(|i| User::new(format!("u{i}"), "e", "p").with_id(i)).collect();
        let mut app = app_with(users);
        let _ = press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_index, 0);
        for _ in 0..5 {
            let _ = press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected_index, 2);
        let _ = press(&mut app, KeyCode::PageUp);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn notice_swallows_keys_until_dismissed() {
        let mut app = app_with(vec![]);
        app.notify(crate::app::Notice::new(crate::app::NoticeKind::Error, "Error", "x"));
        assert!(press(&mut app, KeyCode::Char('q')).is_continue());
        assert!(app.notice().is_some());
        let _ = press(&mut app, KeyCode::Enter);
        assert!(app.notice().is_none());
    }

    #[test]
    fn search_prompt_filters_rows() {
        let mut app = app_with(vec![
            User::new("alice", "a@x", "p").with_id(1),
            User::new("bob", "b@x", "p").with_id(2),
        ]);
        let _ = press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);
        for c in "bo".chars() {
            let _ = press(&mut app, KeyCode::Char(c));
        }
        let _ = press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.selected_user().map(|u| u.name.as_str()), Some("bob"));

        let _ = press(&mut app, KeyCode::Char('/'));
        let _ = press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_users().len(), 2);
    }

    #[test]
    fn edit_then_cancel_confirmation_returns_to_form() {
        let mut app = app_with(vec![User::new("A", "a@x", "p").with_id(1)]);
        let _ = press(&mut app, KeyCode::Char('e'));
        let _ = press(&mut app, KeyCode::Char('!'));
        for _ in 0..3 {
            let _ = press(&mut app, KeyCode::Tab);
        }
        let _ = press(&mut app, KeyCode::Enter);
        assert!(matches!(app.modal, Some(ModalState::Confirm(_))));
        let _ = press(&mut app, KeyCode::Enter);
        match &app.modal {
            Some(ModalState::Form(form)) => {
                assert_eq!(form.name, "A!");
                assert!(!form.submitting);
            }
            other => panic!("expected form, got {other:?}"),
        }
        assert!(!app.list.loading);
    }
}
