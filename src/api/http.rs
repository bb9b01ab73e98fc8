use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{CollectionClient, Operation, User};
use crate::error::ApiError;

/// [`CollectionClient`] over HTTP/JSON using a blocking `reqwest` client.
///
/// Requests go to `{base}/users` and `{base}/users/{id}`. The base URL is used
/// as given apart from trailing slashes; a bad URL fails at request time.
#[derive(Clone, Debug)]
pub struct HttpCollectionClient {
    client: Client,
    collection_url: String,
}

impl HttpCollectionClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            client,
            collection_url: format!("{}/users", base_url.trim_end_matches('/')),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn member_url(&self, id: u64) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response, ApiError> {
        request
            .send()
            .and_then(Response::error_for_status)
            .map_err(|e| ApiError::request_failed(operation, e))
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(operation, request)?
            .json::<T>()
            .map_err(|e| ApiError::request_failed(operation, e))
    }
}

impl CollectionClient for HttpCollectionClient {
    fn list(&self) -> Result<Vec<User>, ApiError> {
        debug!(url = %self.collection_url, "GET");
        self.send_json(Operation::List, self.client.get(&self.collection_url))
    }

    fn create(&self, user: &User) -> Result<User, ApiError> {
        debug!(url = %self.collection_url, "POST");
        self.send_json(
            Operation::Create,
            self.client.post(&self.collection_url).json(user),
        )
    }

    fn update(&self, id: u64, user: &User) -> Result<User, ApiError> {
        let url = self.member_url(id);
        debug!(url = %url, "PUT");
        self.send_json(Operation::Update, self.client.put(&url).json(user))
    }

    fn remove(&self, id: u64) -> Result<(), ApiError> {
        let url = self.member_url(id);
        debug!(url = %url, "DELETE");
        self.send(Operation::Delete, self.client.delete(&url))
            .map(|_| ())
    }
}
