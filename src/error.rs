use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::api::Operation;
use crate::app::form::FormField;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The single failure kind of the collection client.
///
/// Transport errors, non-success statuses and unparsable bodies all land here;
/// the source is kept for the log only.
#[derive(Debug, Error)]
#[error("{operation} request failed: {source}")]
pub struct ApiError {
    pub operation: Operation,
    #[source]
    pub source: DynError,
}

impl ApiError {
    pub fn request_failed(operation: Operation, source: impl Into<DynError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

/// Form submission was blocked because required fields are empty.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("missing required fields: {}", join_labels(.missing))]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

fn join_labels(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug)]
pub struct SimpleError(pub String);

impl SimpleError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl Display for SimpleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SimpleError {}

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Box::new(SimpleError::new(msg))
}
