//! Task form: raw input, normalization and validation in one place.
//!
//! A single [`TaskForm`] serves both the create and the edit flow. Every
//! field change is normalized and validated immediately; submission runs the
//! same checks again and is refused while anything is outstanding.

pub mod normalize;
pub mod validate;

use crate::model::{ListId, NewTask, Task, TaskId, TaskPatch};

pub use normalize::{normalize, Parsed, RawTaskInput, TaskCandidate};
pub use validate::{
    validate_list_name, validate_task, Field, Violation, ViolationKind, Violations,
};

/// Whether the form creates a new task or edits a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a task.
    Create,
    /// Submitting updates the task with this id.
    Edit(TaskId),
}

/// What a successful submission asks the data layer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Create this task.
    Create(NewTask),
    /// Apply this patch to an existing task.
    Update {
        /// Target task.
        id: TaskId,
        /// Fields to overwrite.
        patch: TaskPatch,
    },
}

/// Form state for one task.
#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    raw: RawTaskInput,
    violations: Violations,
}

impl TaskForm {
    /// An empty form for a new task in `list_id`.
    #[must_use]
    pub fn create(list_id: ListId) -> Self {
        let raw = RawTaskInput { list_id: list_id.to_string(), ..RawTaskInput::default() };
        Self::with(FormMode::Create, raw)
    }

    /// A form pre-filled from a stored task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        let raw = RawTaskInput {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority.to_string(),
            due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            tags: task.tags.join(", "),
            estimated_time: task.estimated_time.to_string(),
            actual_time_spent: task.actual_time_spent.to_string(),
            completed: task.completed.to_string(),
            list_id: task.list_id.to_string(),
        };
        Self::with(FormMode::Edit(task.id), raw)
    }

    fn with(mode: FormMode, raw: RawTaskInput) -> Self {
        let violations = validate::check(&normalize(&raw));
        Self { mode, raw, violations }
    }

    /// Create or edit.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The raw text currently in the form.
    #[must_use]
    pub fn raw(&self) -> &RawTaskInput {
        &self.raw
    }

    /// Replaces one field's raw text and revalidates the whole form.
    ///
    /// Setting [`Field::Name`] has no effect; it belongs to the list form.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> &Violations {
        let value = value.into();
        let slot = match field {
            Field::Title => &mut self.raw.title,
            Field::Description => &mut self.raw.description,
            Field::Priority => &mut self.raw.priority,
            Field::DueDate => &mut self.raw.due_date,
            Field::Tags => &mut self.raw.tags,
            Field::EstimatedTime => &mut self.raw.estimated_time,
            Field::ActualTimeSpent => &mut self.raw.actual_time_spent,
            Field::Completed => &mut self.raw.completed,
            Field::ListId => &mut self.raw.list_id,
            Field::Name => return &self.violations,
        };
        *slot = value;
        self.violations = validate::check(&normalize(&self.raw));
        &self.violations
    }

    /// Violations as of the last change.
    #[must_use]
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Returns `true` if the form would currently submit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Validates once more and produces the request to dispatch.
    ///
    /// Edits never send `comments`, so comments stored remotely survive.
    ///
    /// # Errors
    ///
    /// Returns the outstanding violations; nothing should be sent.
    pub fn submit(&self) -> Result<Submission, Violations> {
        let task = validate_task(&normalize(&self.raw))?;
        Ok(match self.mode {
            FormMode::Create => Submission::Create(task),
            FormMode::Edit(id) => Submission::Update { id, patch: patch_from(task) },
        })
    }
}

fn patch_from(task: NewTask) -> TaskPatch {
    TaskPatch {
        title: Some(task.title),
        description: Some(task.description),
        priority: Some(task.priority),
        due_date: Some(task.due_date),
        tags: Some(task.tags),
        completed: Some(task.completed),
        estimated_time: Some(task.estimated_time),
        actual_time_spent: Some(task.actual_time_spent),
        list_id: Some(task.list_id),
    }
}
