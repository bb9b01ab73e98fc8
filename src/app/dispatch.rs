//! Runs collection requests off the event loop and hands results back as messages.
//!
//! Each request gets its own worker thread; there is no queue, de-duplication
//! or cancellation, so concurrent requests may complete in any order.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use tracing::{error, trace};

use crate::api::{CollectionClient, Operation, User};
use crate::error::{ApiError, simple_error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    List,
    Create(User),
    Update { id: u64, user: User },
    Remove { id: u64 },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::List => Operation::List,
            Request::Create(_) => Operation::Create,
            Request::Update { .. } => Operation::Update,
            Request::Remove { .. } => Operation::Delete,
        }
    }

    pub fn execute(self, client: &dyn CollectionClient) -> Outcome {
        match self {
            Request::List => Outcome::Listed(client.list()),
            Request::Create(user) => Outcome::Created(client.create(&user)),
            Request::Update { id, user } => Outcome::Updated {
                id,
                result: client.update(id, &user),
            },
            Request::Remove { id } => Outcome::Removed {
                id,
                result: client.remove(id),
            },
        }
    }

    /// The outcome reported when the request could not even be started.
    fn failed(self, err: ApiError) -> Outcome {
        match self {
            Request::List => Outcome::Listed(Err(err)),
            Request::Create(_) => Outcome::Created(Err(err)),
            Request::Update { id, .. } => Outcome::Updated {
                id,
                result: Err(err),
            },
            Request::Remove { id } => Outcome::Removed {
                id,
                result: Err(err),
            },
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Listed(Result<Vec<User>, ApiError>),
    Created(Result<User, ApiError>),
    Updated {
        id: u64,
        result: Result<User, ApiError>,
    },
    Removed {
        id: u64,
        result: Result<(), ApiError>,
    },
}

impl Outcome {
    pub fn operation(&self) -> Operation {
        match self {
            Outcome::Listed(_) => Operation::List,
            Outcome::Created(_) => Operation::Create,
            Outcome::Updated { .. } => Operation::Update,
            Outcome::Removed { .. } => Operation::Delete,
        }
    }
}

pub struct Dispatcher {
    client: Arc<dyn CollectionClient>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { client, tx, rx }
    }

    /// Start `request` on a worker thread. Its outcome arrives through [`Dispatcher::try_next`].
    pub fn submit(&self, request: Request) {
        let op = request.operation();
        trace!(operation = %op, "submitting request");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let fallback = request.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("usrapi-{}", op).replace(' ', "-"))
            .spawn(move || {
                let outcome = request.execute(client.as_ref());
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(outcome);
            });
        if let Err(e) = spawned {
            error!(operation = %op, error = %e, "failed to spawn request worker");
            let err = ApiError::request_failed(op, simple_error(e.to_string()));
            let _ = self.tx.send(fallback.failed(err));
        }
    }

    pub fn try_next(&self) -> Option<Outcome> {
        self.rx.try_recv().ok()
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Outcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
