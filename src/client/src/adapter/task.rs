//! Task translation between the backend wire shape and the domain model

use super::dates::{to_backend_instant, to_display_date};
use super::status::{status_from_backend, status_to_backend, BackendStatus};
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use taskboard_core::{Priority, Task, TaskStatus, TaskType, UserSummary};
use tracing::warn;

/// Task as the backend sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,

    /// Raw status; mapped leniently so an unknown value cannot fail a listing
    #[serde(default)]
    pub status: String,

    pub responsible_id: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_email: Option<String>,

    pub created_by: Option<String>,

    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,

    pub due_date: Option<String>,
    pub priority: Option<String>,

    #[serde(rename = "type")]
    pub task_type: Option<String>,
}

impl BackendTask {
    /// Translate into the domain model
    pub fn into_task(self) -> Task {
        let assigned_user = self.responsible_id.as_ref().map(|id| UserSummary {
            id: id.clone(),
            name: self.responsible_name.clone().unwrap_or_default(),
            email: self.responsible_email.clone().unwrap_or_default(),
        });

        Task {
            status: status_from_backend(&self.status),
            assigned_to: self.responsible_id,
            assigned_user,
            created_by: self.created_by,
            created_by_user: None,
            due_date: self.due_date.as_deref().map(to_display_date),
            priority: self.priority.as_deref().and_then(|raw| lenient(raw, "priority")),
            task_type: self.task_type.as_deref().and_then(|raw| lenient(raw, "task type")),
            id: self.id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<BackendTask> for Task {
    fn from(task: BackendTask) -> Self {
        task.into_task()
    }
}

fn lenient<T: std::str::FromStr>(raw: &str, kind: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unknown {} '{}'", kind, raw);
            None
        }
    }
}

/// Outbound task body; absent fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BackendStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
}

impl TaskPayload {
    pub fn is_empty(&self) -> bool {
        *self == TaskPayload::default()
    }
}

/// `Some` only for values with non-whitespace content
pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Task form submission for creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
    /// Date-only or date-time; normalized to an instant on the way out
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub task_type: Option<TaskType>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Form rules for a new task
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.min_chars("title", &self.title, 3, "Title");
        errors.min_chars(
            "description",
            self.description.as_deref().unwrap_or_default(),
            10,
            "Description",
        );
        errors.required("assigned_to", self.assigned_to.as_deref(), "Assignee");
        errors.required("due_date", self.due_date.as_deref(), "Due date");
        errors.into_result()
    }

    /// Creation body; status and type are always sent, defaulting to
    /// `Todo` and `Edicao` when the draft leaves them unset
    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: Some(self.title.trim().to_string()),
            description: non_empty(&self.description),
            status: Some(status_to_backend(self.status.unwrap_or_default())),
            responsible_id: non_empty(&self.assigned_to),
            due_date: non_empty(&self.due_date).map(|date| to_backend_instant(&date)),
            priority: self.priority,
            task_type: Some(self.task_type.unwrap_or_default()),
        }
    }
}

/// Partial task update
///
/// Only fields that are set and non-empty reach the backend. There is no
/// way to clear a field through a patch: `Some("")` is the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub task_type: Option<TaskType>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: non_empty(&self.title),
            description: non_empty(&self.description),
            status: self.status.map(status_to_backend),
            responsible_id: non_empty(&self.assigned_to),
            due_date: non_empty(&self.due_date).map(|date| to_backend_instant(&date)),
            priority: self.priority,
            task_type: self.task_type,
        }
    }
}

impl From<TaskDraft> for TaskPatch {
    fn from(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: draft.description,
            status: draft.status,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
            priority: draft.priority,
            task_type: draft.task_type,
        }
    }
}

/// Listing filters; the status is given in the internal vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub responsible_id: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TaskFilter {
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_responsible(mut self, user_id: impl Into<String>) -> Self {
        self.responsible_id = Some(user_id.into());
        self
    }

    /// Query parameters in the backend vocabulary
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status_to_backend(status).as_str().to_string()));
        }
        if let Some(id) = non_empty(&self.responsible_id) {
            query.push(("responsible_id", id));
        }
        if let Some(title) = non_empty(&self.title) {
            query.push(("title", title));
        }
        if let Some(start) = non_empty(&self.start_date) {
            query.push(("start_date", start));
        }
        if let Some(end) = non_empty(&self.end_date) {
            query.push(("end_date", end));
        }
        query
    }
}
