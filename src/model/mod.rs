//! Lists, tasks and comments as exchanged with the hosted store.
//!
//! The remote store is authoritative: these types mirror what it returns.
//! Field names follow the store's camelCase JSON (`dueDate`, `listId`, ...).

mod wire;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use wire::{decode_due_date, encode_due_date};

/// Identifier the remote store assigns to a list.
pub type ListId = u64;

/// Identifier the remote store assigns to a task.
pub type TaskId = u64;

/// The two resource collections exposed by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// `/lists`
    Lists,
    /// `/todos`
    Todos,
}

impl ResourceKind {
    /// Collection path on the remote store, without a leading slash.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Lists => "lists",
            Self::Todos => "todos",
        }
    }

    /// Singular noun used in messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Lists => "list",
            Self::Todos => "todo",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Task priority. Absent priorities are treated as [`Priority::Low`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Default priority.
    #[default]
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Every accepted priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The wire literal for this priority.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses one of the three literals, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored records may carry a missing, null, numeric or unknown priority; all read as `low`.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => Ok(Self::parse(&raw).unwrap_or_default()),
            _ => Ok(Self::default()),
        }
    }
}

/// A named grouping of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Store-assigned identifier.
    #[serde(deserialize_with = "wire::id")]
    pub id: ListId,
    /// Display name.
    pub name: String,
}

/// Body of a list creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewList {
    /// Display name.
    pub name: String,
}

/// Partial list update; only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Store-assigned identifier.
    #[serde(deserialize_with = "wire::id")]
    pub id: u64,
    /// Comment body.
    pub text: String,
    /// Who wrote it.
    pub author: String,
    /// When it was written.
    pub created_at: DateTime<Utc>,
}

/// A unit of work belonging to exactly one [`List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier.
    #[serde(deserialize_with = "wire::id")]
    pub id: TaskId,
    /// Required title.
    pub title: String,
    /// Free text, empty when unset.
    #[serde(default, deserialize_with = "wire::null_default")]
    pub description: String,
    /// Priority, `low` when unset.
    #[serde(default)]
    pub priority: Priority,
    /// Calendar due date. Never an invalid date.
    #[serde(default, with = "wire::due_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Ordered tags.
    #[serde(default, deserialize_with = "wire::null_default")]
    pub tags: Vec<String>,
    /// Whether the task is done.
    #[serde(default, deserialize_with = "wire::null_default")]
    pub completed: bool,
    /// Estimated hours.
    #[serde(default, deserialize_with = "wire::null_default")]
    pub estimated_time: f64,
    /// Hours actually spent.
    #[serde(default, deserialize_with = "wire::null_default")]
    pub actual_time_spent: f64,
    /// Comments, oldest first.
    #[serde(default, deserialize_with = "wire::null_default")]
    pub comments: Vec<Comment>,
    /// Owning list.
    #[serde(deserialize_with = "wire::id")]
    pub list_id: ListId,
}

/// Body of a task creation request: a fully defaulted task without an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Required, trimmed title.
    pub title: String,
    /// Description, empty when not given.
    pub description: String,
    /// Priority, `low` when not given.
    pub priority: Priority,
    /// Due date, omitted from the body when absent.
    #[serde(with = "wire::due_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Trimmed, non-empty tags.
    pub tags: Vec<String>,
    /// Completion flag, `false` when not given.
    pub completed: bool,
    /// Estimated hours, `0` when not given.
    pub estimated_time: f64,
    /// Hours spent, `0` when not given.
    pub actual_time_spent: f64,
    /// Always empty on creation.
    pub comments: Vec<Comment>,
    /// Owning list.
    pub list_id: ListId,
}

/// Partial task update; only `Some` fields are sent.
///
/// `due_date: Some(None)` clears the stored due date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "wire::patch_due_date")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_time_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<ListId>,
}

impl TaskPatch {
    /// A patch that only sets the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), ..Self::default() }
    }

    /// Returns `true` if the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
