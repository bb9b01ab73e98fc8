//! Application state types and entry glue.
//!
//! [`AppState`] owns the list projection, the modal state machine and the
//! request dispatcher. Key handling and the event loop live in [`update`]
//! (re-exported as `run`).
//!
pub mod confirm;
pub mod dispatch;
pub mod form;
pub mod keymap;
pub mod list;
pub mod update;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::api::{CollectionClient, Operation, User};
use crate::search;
use crate::ui::components::Theme;

use self::confirm::{ConfirmChoice, Confirmation, PendingAction};
use self::dispatch::{Dispatcher, Outcome, Request};
use self::form::{FormIntent, UserForm};
use self::keymap::Keymap;
use self::list::UserList;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Modal dialogs drawn over the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Form(UserForm),
    Confirm(Confirmation),
    Help { scroll: u16 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Validation,
}

/// A one-shot message shown above everything until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    fn failure(op: Operation) -> Self {
        Self::new(NoticeKind::Error, "Error", op.failure_message())
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub list: UserList,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    /// Pending notices, oldest first; only the front one is shown.
    notices: VecDeque<Notice>,
    /// Collection URL shown in the header.
    pub endpoint: String,
    pub spinner_frame: usize,
    dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(
        client: Arc<dyn CollectionClient>,
        keymap: Keymap,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            started_at: Instant::now(),
            list: UserList::default(),
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme: Theme::mocha(),
            keymap,
            modal: None,
            notices: VecDeque::new(),
            endpoint: endpoint.into(),
            spinner_frame: 0,
            dispatcher: Dispatcher::new(client),
        }
    }

    /// Rows currently displayed, after the search filter.
    pub fn visible_users(&self) -> Vec<&User> {
        search::filter_users(&self.list.users, &self.search_query)
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.visible_users().get(self.selected_index).copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_users().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    fn dispatch(&mut self, request: Request) {
        self.list.begin_request();
        self.dispatcher.submit(request);
    }

    /// Reload the whole collection.
    pub fn refresh(&mut self) {
        self.dispatch(Request::List);
    }

    pub fn open_add(&mut self) {
        self.modal = Some(ModalState::Form(UserForm::for_add()));
        self.input_mode = InputMode::Modal;
    }

    pub fn open_edit(&mut self) {
        let Some(user) = self.selected_user() else {
            return;
        };
        match UserForm::for_edit(user) {
            Some(form) => {
                self.modal = Some(ModalState::Form(form));
                self.input_mode = InputMode::Modal;
            }
            None => self.notify(Notice::new(
                NoticeKind::Error,
                "Error",
                "This user has no id yet and cannot be edited.",
            )),
        }
    }

    pub fn request_delete(&mut self) {
        let Some(user) = self.selected_user() else {
            return;
        };
        match user.id {
            Some(id) => {
                let confirmation = Confirmation::delete(id, user.name.clone());
                self.modal = Some(ModalState::Confirm(confirmation));
                self.input_mode = InputMode::Modal;
            }
            None => self.notify(Notice::new(
                NoticeKind::Error,
                "Error",
                "This user has no id yet and cannot be deleted.",
            )),
        }
    }

    pub fn open_help(&mut self) {
        self.modal = Some(ModalState::Help { scroll: 0 });
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validate the open form and either create right away or ask before replacing.
    pub fn submit_form(&mut self) {
        let Some(ModalState::Form(form)) = self.modal.as_mut() else {
            return;
        };
        if form.submitting {
            return;
        }
        let body = match form.validate() {
            Ok(body) => body,
            Err(e) => {
                info!(error = %e, "form submission blocked");
                self.notify(Notice::new(
                    NoticeKind::Validation,
                    "Validation",
                    "Please fill all fields.",
                ));
                return;
            }
        };
        match form.intent {
            FormIntent::Add => {
                form.submitting = true;
                self.dispatch(Request::Create(body));
            }
            FormIntent::Edit { id } => {
                let confirmation = Confirmation::update(id, body, form.clone());
                self.modal = Some(ModalState::Confirm(confirmation));
            }
        }
    }

    /// Resolve the pending confirmation, if any.
    pub fn resolve_confirmation(&mut self, choice: ConfirmChoice) {
        let Some(ModalState::Confirm(confirmation)) = self.modal.take() else {
            return;
        };
        match confirmation.resolve(choice) {
            Some(PendingAction::Delete { id, name }) => {
                info!(id, name = %name, "delete confirmed");
                self.close_modal();
                self.dispatch(Request::Remove { id });
            }
            Some(PendingAction::Update { id, user }) => {
                info!(id, "update confirmed");
                match confirmation.resume {
                    Some(mut form) => {
                        form.submitting = true;
                        self.modal = Some(ModalState::Form(form));
                    }
                    None => self.close_modal(),
                }
                self.dispatch(Request::Update { id, user });
            }
            None => match confirmation.resume {
                Some(form) => self.modal = Some(ModalState::Form(form)),
                None => self.close_modal(),
            },
        }
    }

    /// Queue `notice` behind any that are still showing.
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// The notice currently on screen.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Apply every outcome that has arrived so far without blocking.
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.dispatcher.try_next() {
            self.apply_outcome(outcome);
            applied += 1;
        }
        applied
    }

    /// Block until no request is in flight or `timeout` passes.
    pub fn wait_for_outcomes(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while self.list.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.dispatcher.next_timeout(remaining) {
                Some(outcome) => self.apply_outcome(outcome),
                None => break,
            }
        }
    }

    /// Reconcile the list with a finished request and tell the user how it went.
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        self.list.finish_request();
        let op = outcome.operation();
        let closes_form = self.is_awaiting(&outcome);
        let succeeded = match outcome {
            Outcome::Listed(Ok(users)) => {
                info!(count = users.len(), "users loaded");
                self.list.replace_all(users);
                true
            }
            Outcome::Created(Ok(user)) => {
                info!(id = ?user.id, "user created");
                self.list.apply_created(user);
                true
            }
            Outcome::Updated { id, result: Ok(user) } => {
                info!(id, "user updated");
                if !self.list.apply_updated(id, user) {
                    warn!(id, "updated user is no longer listed");
                }
                true
            }
            Outcome::Removed { id, result: Ok(()) } => {
                info!(id, "user deleted");
                if !self.list.apply_removed(id) {
                    warn!(id, "deleted user was not listed");
                }
                true
            }
            Outcome::Listed(Err(e))
            | Outcome::Created(Err(e))
            | Outcome::Updated { result: Err(e), .. }
            | Outcome::Removed { result: Err(e), .. } => {
                warn!(error = %e, "request failed");
                false
            }
        };

        if closes_form {
            self.close_modal();
        }
        self.clamp_selection();

        if succeeded {
            if let Some((title, message)) = op.success_notice() {
                self.notify(Notice::new(NoticeKind::Success, title, message));
            }
        } else {
            self.notify(Notice::failure(op));
        }
    }

    /// Whether the open form is the one whose save produced `outcome`.
    fn is_awaiting(&self, outcome: &Outcome) -> bool {
        let Some(ModalState::Form(form)) = &self.modal else {
            return false;
        };
        if !form.submitting {
            return false;
        }
        match outcome {
            Outcome::Created(_) => form.intent == FormIntent::Add,
            Outcome::Updated { id, .. } => form.intent == FormIntent::Edit { id: *id },
            Outcome::Listed(_) | Outcome::Removed { .. } => false,
        }
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        if self.list.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
