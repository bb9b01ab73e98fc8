//! Create/edit form buffer.
//!
//! The form is either adding a new record or editing an existing one; which one
//! is carried by [`FormIntent`] rather than by a nullable "record being edited".

use crate::api::User;
use crate::error::ValidationError;

/// Whether the open form creates a record or replaces the one with `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormIntent {
    Add,
    Edit { id: u64 },
}

/// Focus targets inside the form modal, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
    Save,
    Cancel,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Password,
        FormField::Save,
        FormField::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::Save => "Save",
            FormField::Cancel => "Cancel",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    pub intent: FormIntent,
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: FormField,
    /// Set while the save request is in flight; edits are ignored meanwhile.
    pub submitting: bool,
}

impl UserForm {
    /// Fresh empty form for a new record.
    pub fn for_add() -> Self {
        Self {
            intent: FormIntent::Add,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            focus: FormField::Name,
            submitting: false,
        }
    }

    /// Form pre-filled from `user`. Returns `None` when the record has no id yet.
    pub fn for_edit(user: &User) -> Option<Self> {
        let id = user.id?;
        Some(Self {
            intent: FormIntent::Edit { id },
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            focus: FormField::Name,
            submitting: false,
        })
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.intent, FormIntent::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        match self.intent {
            FormIntent::Add => "Add New User",
            FormIntent::Edit { .. } => "Edit User",
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::Save | FormField::Cancel => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.submitting {
            return;
        }
        let focus = self.focus;
        if let Some(value) = self.field_mut(focus) {
            value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.submitting {
            return;
        }
        let focus = self.focus;
        if let Some(value) = self.field_mut(focus) {
            value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Check that every field is filled and build the request body.
    ///
    /// The body carries the target id when editing and none when adding.
    pub fn validate(&self) -> Result<User, ValidationError> {
        let missing: Vec<FormField> = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Password, &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(User {
            id: match self.intent {
                FormIntent::Add => None,
                FormIntent::Edit { id } => Some(id),
            },
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}
