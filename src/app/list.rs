//! In-memory projection of the remote collection.
//!
//! Only request outcomes mutate it, and only after the server answered; there
//! is no speculative update to roll back.

use crate::api::User;

#[derive(Clone, Debug, Default)]
pub struct UserList {
    pub users: Vec<User>,
    /// True while at least one request is in flight.
    pub loading: bool,
    in_flight: usize,
}

impl UserList {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            loading: false,
            in_flight: 0,
        }
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
        self.loading = true;
    }

    /// Called for every outcome, successful or not.
    pub fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Wholesale refresh; server order is kept.
    pub fn replace_all(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn apply_created(&mut self, user: User) {
        self.users.push(user);
    }

    /// Replace the record whose id is `id`. Returns false when it is no longer listed.
    pub fn apply_updated(&mut self, id: u64, mut user: User) -> bool {
        if user.id.is_none() {
            user.id = Some(id);
        }
        match self.position(id) {
            Some(idx) => {
                self.users[idx] = user;
                true
            }
            None => false,
        }
    }

    /// Drop every record whose id is `id`. Returns false when nothing matched.
    pub fn apply_removed(&mut self, id: u64) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != Some(id));
        self.users.len() != before
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.users.iter().position(|u| u.id == Some(id))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
