// Shared test doubles for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use usrapi_manager::api::{CollectionClient, Operation, User};
use usrapi_manager::app::AppState;
use usrapi_manager::app::keymap::Keymap;
use usrapi_manager::error::{ApiError, simple_error};

pub const WAIT: Duration = Duration::from_secs(5);

/// In-memory collection that records every call it receives.
pub struct FakeCollection {
    state: Mutex<FakeState>,
}

struct FakeState {
    users: Vec<User>,
    next_id: u64,
    failing: bool,
    calls: Vec<String>,
}

impl FakeCollection {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let next_id = users.iter().filter_map(|u| u.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            state: Mutex::new(FakeState {
                users,
                next_id,
                failing: false,
                calls: Vec::new(),
            }),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(
        &self,
        op: Operation,
        call: String,
    ) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing {
            return Err(ApiError::request_failed(op, simple_error("connection refused")));
        }
        Ok(state)
    }
}

impl CollectionClient for FakeCollection {
    fn list(&self) -> Result<Vec<User>, ApiError> {
        let state = self.record(Operation::List, "GET /users".into())?;
        Ok(state.users.clone())
    }

    fn create(&self, user: &User) -> Result<User, ApiError> {
        let mut state = self.record(Operation::Create, "POST /users".into())?;
        let created = user.clone().with_id(state.next_id);
        state.next_id += 1;
        state.users.push(created.clone());
        Ok(created)
    }

    fn update(&self, id: u64, user: &User) -> Result<User, ApiError> {
        let mut state = self.record(Operation::Update, format!("PUT /users/{id}"))?;
        let updated = user.clone().with_id(id);
        if let Some(slot) = state.users.iter_mut().find(|u| u.id == Some(id)) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    fn remove(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.record(Operation::Delete, format!("DELETE /users/{id}"))?;
        state.users.retain(|u| u.id != Some(id));
        Ok(())
    }
}

pub fn user(id: u64, name: &str) -> User {
    User::new(name, format!("{}@x.com", name.to_lowercase()), "p").with_id(id)
}

/// App wired to `fake`, with the initial load already applied.
pub fn loaded_app(fake: &Arc<FakeCollection>) -> AppState {
    let client: Arc<dyn CollectionClient> = fake.clone();
    let mut app = AppState::new(client, Keymap::default(), "http://fake/users");
    app.refresh();
    app.wait_for_outcomes(WAIT);
    app
}
