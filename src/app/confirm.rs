//! Confirmation gate for destructive and replacing requests.
//!
//! A [`Confirmation`] is plain pending state; resolving it with a
//! [`ConfirmChoice`] yields the action to run, so the gate works without a terminal.

use crate::api::User;
use crate::app::form::UserForm;

/// A request that waits for the user's go-ahead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Delete { id: u64, name: String },
    Update { id: u64, user: User },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmChoice {
    Cancel,
    Confirm,
}

impl ConfirmChoice {
    pub fn toggled(self) -> Self {
        match self {
            ConfirmChoice::Cancel => ConfirmChoice::Confirm,
            ConfirmChoice::Confirm => ConfirmChoice::Cancel,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub action: PendingAction,
    /// Highlighted button; Cancel by default.
    pub selected: ConfirmChoice,
    /// Form to return to, filled as it was, when an update is cancelled.
    pub resume: Option<UserForm>,
}

impl Confirmation {
    pub fn delete(id: u64, name: impl Into<String>) -> Self {
        Self {
            action: PendingAction::Delete {
                id,
                name: name.into(),
            },
            selected: ConfirmChoice::Cancel,
            resume: None,
        }
    }

    pub fn update(id: u64, user: User, form: UserForm) -> Self {
        Self {
            action: PendingAction::Update { id, user },
            selected: ConfirmChoice::Cancel,
            resume: Some(form),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.action {
            PendingAction::Delete { .. } => "Confirm Delete",
            PendingAction::Update { .. } => "Confirm Update",
        }
    }

    pub fn question(&self) -> &'static str {
        match self.action {
            PendingAction::Delete { .. } => "Are you sure you want to delete this user?",
            PendingAction::Update { .. } => "Are you sure you want to update this user?",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self.action {
            PendingAction::Delete { .. } => "Delete",
            PendingAction::Update { .. } => "Update",
        }
    }

    pub fn toggle(&mut self) {
        self.selected = self.selected.toggled();
    }

    /// The action to run, or `None` when the user backed out.
    pub fn resolve(&self, choice: ConfirmChoice) -> Option<PendingAction> {
        match choice {
            ConfirmChoice::Confirm => Some(self.action.clone()),
            ConfirmChoice::Cancel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_cancel() {
        let c = Confirmation::delete(2, "B");
        assert_eq!(c.selected, ConfirmChoice::Cancel);
        assert_eq!(c.resolve(c.selected), None);
    }

    #[test]
    fn confirm_yields_the_pending_action() {
        let c = Confirmation::delete(2, "B");
        assert_eq!(
            c.resolve(ConfirmChoice::Confirm),
            Some(PendingAction::Delete { id: 2, name: "B".into() })
        );
    }

    #[test]
    fn update_keeps_form_to_resume() {
        let user = User::new("A", "a@x.com", "p").with_id(1);
        let form = UserForm::for_edit(&user).unwrap();
        let mut c = Confirmation::update(1, user.clone(), form.clone());
        assert_eq!(c.resume, Some(form));
        assert_eq!(c.title(), "Confirm Update");
        c.toggle();
        assert_eq!(c.selected, ConfirmChoice::Confirm);
        assert_eq!(c.resolve(c.selected), Some(PendingAction::Update { id: 1, user }));
    }
}
