//! Remote transport port for the hosted list/todo store.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Boxed future type alias used by [`RemoteTransport`] to keep the trait dyn-compatible.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RemoteResponse, TransportError>> + Send + 'a>>;

/// HTTP verbs the store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a collection or a single record.
    Get,
    /// Create a record.
    Post,
    /// Partially update a record.
    Put,
    /// Remove a record.
    Delete,
}

impl Method {
    /// Upper-case verb as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the store, relative to its base URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path relative to the base URL, e.g. `/todos/7`.
    pub path: String,
    /// JSON body for `POST` and `PUT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RemoteRequest {
    /// `GET path`
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: None }
    }

    /// `POST path` with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, path: path.into(), body: Some(body) }
    }

    /// `PUT path` with a partial JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Put, path: path.into(), body: Some(body) }
    }

    /// `DELETE path`
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), body: None }
    }

    /// `"GET /todos/7"`, used to key recorded interactions.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// What the store answered. Non-2xx statuses are still `Ok` at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `null` for an empty body.
    #[serde(default)]
    pub body: Value,
}

impl RemoteResponse {
    /// Returns `true` for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TransportError {
    /// No response within the configured timeout.
    #[error("request to {0} timed out")]
    Timeout(String),
    /// The store could not be reached.
    #[error("could not reach {url}: {message}")]
    Connect {
        /// Target URL.
        url: String,
        /// Underlying cause.
        message: String,
    },
    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Sends requests to the remote store.
///
/// Abstracting the transport allows deterministic replay and testing
/// without touching the hosted API.
pub trait RemoteTransport: Send + Sync {
    /// Sends one request and resolves with the store's response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received (network, timeout, etc.).
    fn send(&self, request: &RemoteRequest) -> TransportFuture<'_>;
}

impl<T: RemoteTransport + ?Sized> RemoteTransport for std::sync::Arc<T> {
    fn send(&self, request: &RemoteRequest) -> TransportFuture<'_> {
        (**self).send(request)
    }
}
