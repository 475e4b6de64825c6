//! Cached access to lists and todos.
//!
//! Reads are served from the [`QueryCache`] while fresh and refetched
//! otherwise. Every successful write invalidates the keys it touched, so the
//! next read of those keys goes back to the store. Failed writes touch nothing.

use std::future::Future;

use crate::api::{ApiError, TodoApi};
use crate::cache::{Cacheable, QueryCache, QueryKey};
use crate::form::{validate_list_name, Submission, TaskForm, Violations};
use crate::model::{
    List, ListId, ListPatch, NewList, NewTask, ResourceKind, Task, TaskId, TaskPatch,
};

/// A form submission was refused or failed remotely.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// Validation failed; nothing was sent.
    #[error("{0}")]
    Invalid(Violations),
    /// The store rejected the write.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// [`TodoApi`] behind a read cache.
pub struct TodoClient {
    api: TodoApi,
    cache: QueryCache,
}

impl TodoClient {
    /// Wraps data access with an empty cache.
    #[must_use]
    pub fn new(api: TodoApi) -> Self {
        Self { api, cache: QueryCache::new() }
    }

    /// The cache backing reads.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn read<T, F>(&self, key: QueryKey, fetch: F) -> Result<T, ApiError>
    where
        T: Cacheable + Clone,
        F: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache.fresh(key).and_then(T::from_cached) {
            return Ok(hit);
        }
        let ticket = self.cache.begin_fetch(key);
        match fetch.await {
            Ok(value) => {
                self.cache.complete_fetch(ticket, value.clone().into_cached());
                Ok(value)
            }
            Err(err) => {
                self.cache.fail_fetch(ticket, &err);
                Err(err)
            }
        }
    }

    fn invalidated<T>(
        &self,
        kind: ResourceKind,
        id: u64,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if result.is_ok() {
            self.cache.invalidate(kind, Some(id));
        }
        result
    }

    // --- lists ---

    /// Every list.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed refetch.
    pub async fn lists(&self) -> Result<Vec<List>, ApiError> {
        self.read(QueryKey::Lists, self.api.lists()).await
    }

    /// One list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn list(&self, id: ListId) -> Result<List, ApiError> {
        self.read(QueryKey::List(id), self.api.list(id)).await
    }

    /// Creates a list.
    ///
    /// # Errors
    ///
    /// Returns the store's rejection.
    pub async fn create_list(&self, list: &NewList) -> Result<List, ApiError> {
        let created = self.api.create_list(list).await?;
        self.cache.invalidate(ResourceKind::Lists, Some(created.id));
        Ok(created)
    }

    /// Validates `name` and creates a list with it.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] for a blank or too-short name.
    pub async fn create_list_named(&self, name: &str) -> Result<List, SubmitError> {
        let list = validate_list_name(name).map_err(SubmitError::Invalid)?;
        Ok(self.create_list(&list).await?)
    }

    /// Renames a list after validating the new name.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] for a bad name, or the store's rejection.
    pub async fn rename_list(&self, id: ListId, name: &str) -> Result<List, SubmitError> {
        let NewList { name } = validate_list_name(name).map_err(SubmitError::Invalid)?;
        Ok(self.update_list(id, &ListPatch { name: Some(name) }).await?)
    }

    /// Applies a partial update to a list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn update_list(&self, id: ListId, patch: &ListPatch) -> Result<List, ApiError> {
        let result = self.api.update_list(id, patch).await;
        self.invalidated(ResourceKind::Lists, id, result)
    }

    /// Deletes a list. Its todos are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn delete_list(&self, id: ListId) -> Result<(), ApiError> {
        let result = self.api.delete_list(id).await;
        self.invalidated(ResourceKind::Lists, id, result)
    }

    // --- todos ---

    /// Every todo across all lists.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed refetch.
    pub async fn todos(&self) -> Result<Vec<Task>, ApiError> {
        self.read(QueryKey::Todos, self.api.todos()).await
    }

    /// Todos belonging to one list, in store order.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed refetch.
    pub async fn todos_in_list(&self, list_id: ListId) -> Result<Vec<Task>, ApiError> {
        let mut todos = self.todos().await?;
        todos.retain(|t| t.list_id == list_id);
        Ok(todos)
    }

    /// One todo.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn todo(&self, id: TaskId) -> Result<Task, ApiError> {
        self.read(QueryKey::Todo(id), self.api.todo(id)).await
    }

    /// Creates a todo.
    ///
    /// # Errors
    ///
    /// Returns the store's rejection.
    pub async fn create_todo(&self, task: &NewTask) -> Result<Task, ApiError> {
        let created = self.api.create_todo(task).await?;
        self.cache.invalidate(ResourceKind::Todos, Some(created.id));
        Ok(created)
    }

    /// Applies a partial update to a todo.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn update_todo(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let result = self.api.update_todo(id, patch).await;
        self.invalidated(ResourceKind::Todos, id, result)
    }

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn delete_todo(&self, id: TaskId) -> Result<(), ApiError> {
        let result = self.api.delete_todo(id).await;
        self.invalidated(ResourceKind::Todos, id, result)
    }

    /// Flips a todo's completion flag, sending nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the todo is gone.
    pub async fn toggle_completed(&self, task: &Task) -> Result<Task, ApiError> {
        self.update_todo(task.id, &TaskPatch::completed(!task.completed)).await
    }

    /// Validates the form and dispatches a create or an update.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] without touching the network when
    /// validation fails, or [`SubmitError::Api`] when the store rejects the write.
    pub async fn submit(&self, form: &TaskForm) -> Result<Task, SubmitError> {
        match form.submit().map_err(SubmitError::Invalid)? {
            Submission::Create(task) => Ok(self.create_todo(&task).await?),
            Submission::Update { id, patch } => Ok(self.update_todo(id, &patch).await?),
        }
    }
}
