//! Typed data access for lists and todos.
//!
//! One method per (resource, verb) pair. Every call goes straight to the
//! remote store; caching lives one layer up in [`crate::client`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::model::{
    List, ListId, ListPatch, NewList, NewTask, ResourceKind, Task, TaskId, TaskPatch,
};
use crate::ports::{RemoteRequest, RemoteTransport};

/// A data-access call failed. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The identifier does not resolve on the store.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Collection that was queried.
        resource: ResourceKind,
        /// Identifier that did not resolve.
        id: u64,
    },
    /// Non-2xx response, transport failure, or an unreadable body.
    #[error("remote error: {0}")]
    Remote(String),
}

/// Data access over a [`RemoteTransport`].
pub struct TodoApi {
    remote: Box<dyn RemoteTransport>,
}

impl TodoApi {
    /// Wraps a transport.
    #[must_use]
    pub fn new(remote: Box<dyn RemoteTransport>) -> Self {
        Self { remote }
    }

    /// `GET /lists`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] on any failure.
    pub async fn lists(&self) -> Result<Vec<List>, ApiError> {
        self.fetch_all(ResourceKind::Lists).await
    }

    /// `GET /lists/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Remote`] otherwise.
    pub async fn list(&self, id: ListId) -> Result<List, ApiError> {
        self.fetch_one(ResourceKind::Lists, id).await
    }

    /// `POST /lists`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] on any failure.
    pub async fn create_list(&self, list: &NewList) -> Result<List, ApiError> {
        self.create(ResourceKind::Lists, list).await
    }

    /// `PUT /lists/{id}` with only the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Remote`] otherwise.
    pub async fn update_list(&self, id: ListId, patch: &ListPatch) -> Result<List, ApiError> {
        self.update(ResourceKind::Lists, id, patch).await
    }

    /// `DELETE /lists/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Remote`] otherwise.
    pub async fn delete_list(&self, id: ListId) -> Result<(), ApiError> {
        self.delete(ResourceKind::Lists, id).await
    }

    /// `GET /todos`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] on any failure.
    pub async fn todos(&self) -> Result<Vec<Task>, ApiError> {
        self.fetch_all(ResourceKind::Todos).await
    }

    /// `GET /todos/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Remote`] otherwise.
    pub async fn todo(&self, id: TaskId) -> Result<Task, ApiError> {
        self.fetch_one(ResourceKind::Todos, id).await
    }

    /// `POST /todos`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] on any failure.
    pub async fn create_todo(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.create(ResourceKind::Todos, task).await
    }

    /// `PUT /todos/{id}` with only the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Remote`] otherwise.
    pub async fn update_todo(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.update(ResourceKind::Todos, id, patch).await
    }

    /// `DELETE /todos/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Remote`] otherwise.
    pub async fn delete_todo(&self, id: TaskId) -> Result<(), ApiError> {
        self.delete(ResourceKind::Todos, id).await
    }

    async fn fetch_all<T: DeserializeOwned>(&self, kind: ResourceKind) -> Result<Vec<T>, ApiError> {
        let body = self.execute(kind, None, RemoteRequest::get(format!("/{}", kind.path()))).await?;
        decode(kind, body)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        id: u64,
    ) -> Result<T, ApiError> {
        let body = self.execute(kind, Some(id), RemoteRequest::get(item_path(kind, id))).await?;
        decode(kind, body)
    }

    async fn create<B, T>(&self, kind: ResourceKind, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = RemoteRequest::post(format!("/{}", kind.path()), encode(body)?);
        let body = self.execute(kind, None, request).await?;
        decode(kind, body)
    }

    async fn update<B, T>(&self, kind: ResourceKind, id: u64, patch: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = RemoteRequest::put(item_path(kind, id), encode(patch)?);
        let body = self.execute(kind, Some(id), request).await?;
        decode(kind, body)
    }

    async fn delete(&self, kind: ResourceKind, id: u64) -> Result<(), ApiError> {
        self.execute(kind, Some(id), RemoteRequest::delete(item_path(kind, id))).await.map(drop)
    }

    async fn execute(
        &self,
        kind: ResourceKind,
        id: Option<u64>,
        request: RemoteRequest,
    ) -> Result<Value, ApiError> {
        let response = self.remote.send(&request).await.map_err(|e| {
            warn!(route = %request.route(), error = %e, "remote call failed");
            ApiError::Remote(e.to_string())
        })?;

        if response.is_success() {
            return Ok(response.body);
        }
        if let (404, Some(id)) = (response.status, id) {
            return Err(ApiError::NotFound { resource: kind, id });
        }
        warn!(route = %request.route(), status = response.status, "remote call rejected");
        Err(ApiError::Remote(format!("{} returned HTTP {}", request.route(), response.status)))
    }
}

fn item_path(kind: ResourceKind, id: u64) -> String {
    format!("/{}/{id}", kind.path())
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Remote(format!("Failed to encode request body: {e}")))
}

fn decode<T: DeserializeOwned>(kind: ResourceKind, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::Remote(format!("Unexpected {kind} payload from store: {e}")))
}
