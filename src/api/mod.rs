//! Remote collection layer: the user record, the client trait and its HTTP implementation.
//!
//! Every transport concern (URL layout, timeouts, status handling) stays behind
//! [`CollectionClient`] so the rest of the crate only sees records and [`ApiError`].
pub mod http;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use http::HttpCollectionClient;

/// A user record as served by the collection endpoint.
///
/// `id` is assigned by the server and absent for records that were never created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// The four requests the screen can make against the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Notice title and message shown after a successful request. Listing is silent.
    pub fn success_notice(self) -> Option<(&'static str, &'static str)> {
        match self {
            Operation::List => None,
            Operation::Create => Some(("Added", "User added successfully.")),
            Operation::Update => Some(("Updated", "User updated successfully.")),
            Operation::Delete => Some(("Deleted", "User deleted successfully.")),
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch users.",
            Operation::Create => "Failed to add user.",
            Operation::Update => "Failed to update user.",
            Operation::Delete => "Failed to delete user.",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operation::List => "list users",
            Operation::Create => "create user",
            Operation::Update => "update user",
            Operation::Delete => "delete user",
        };
        f.write_str(s)
    }
}

/// Access to the remote user collection. One attempt per call, no retries.
pub trait CollectionClient: Send + Sync {
    /// `GET /users`
    fn list(&self) -> Result<Vec<User>, ApiError>;
    /// `POST /users`; returns the record with its server-assigned id.
    fn create(&self, user: &User) -> Result<User, ApiError>;
    /// `PUT /users/{id}`; full replace.
    fn update(&self, id: u64, user: &User) -> Result<User, ApiError>;
    /// `DELETE /users/{id}`
    fn remove(&self, id: u64) -> Result<(), ApiError>;
}
